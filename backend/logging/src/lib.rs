//! Structured logging for Plugbase.
//!
//! Wraps `tracing` with console output and optional rolling JSON file
//! output, with environment-based level control.

pub mod logger;

pub use logger::init_logger;
