//! Event payload and firing outcome types.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Payload handed to every subscriber when an event fires.
///
/// `data` carries whatever keys the caller supplied; `event` always names
/// the fired event, so subscribers never have to guess which registration
/// triggered them.
#[derive(Debug, Clone, Serialize)]
pub struct EventPayload {
    pub event: String,
    pub data: Map<String, Value>,
}

impl EventPayload {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: Map::new(),
        }
    }

    pub fn with_data(event: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Caller-supplied signaller identifier, when one was passed along.
    pub fn signaller(&self) -> Option<&str> {
        self.data.get("signaller").and_then(Value::as_str)
    }
}

/// Aggregate result of firing an event.
///
/// `success` is the logical AND across all invoked subscribers, vacuously
/// true when none were invoked. `statuses` keeps every individual result
/// keyed by the subscriber's uniquename.
#[derive(Debug, Clone, Serialize)]
pub struct FireOutcome {
    pub success: bool,
    pub statuses: HashMap<String, bool>,
}

impl FireOutcome {
    /// Outcome of a fire that has invoked nobody (yet).
    pub fn empty() -> Self {
        Self {
            success: true,
            statuses: HashMap::new(),
        }
    }

    pub fn record(&mut self, uniquename: impl Into<String>, status: bool) {
        if !status {
            self.success = false;
        }
        self.statuses.insert(uniquename.into(), status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_exposes_event_and_signaller() {
        let mut data = Map::new();
        data.insert("signaller".into(), json!("core"));
        data.insert("detail".into(), json!(42));
        let payload = EventPayload::with_data("Init", data);
        assert_eq!(payload.event, "Init");
        assert_eq!(payload.signaller(), Some("core"));
        assert_eq!(payload.get("detail"), Some(&json!(42)));
    }

    #[test]
    fn outcome_aggregates_with_logical_and() {
        let mut outcome = FireOutcome::empty();
        assert!(outcome.success);
        outcome.record("a", true);
        assert!(outcome.success);
        outcome.record("b", false);
        assert!(!outcome.success);
        outcome.record("c", true);
        assert!(!outcome.success);
        assert_eq!(outcome.statuses.len(), 3);
    }
}
