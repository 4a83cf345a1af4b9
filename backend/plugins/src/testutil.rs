//! Configurable plugin fixture shared by the runtime tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::{Map, Value};

use plugbase_core::{EventPayload, Plugin, PluginHost, SignalArgs};

/// What a signal delivery looked like, minus the host handle.
#[derive(Debug, Clone)]
pub struct SignalRecord {
    pub loaded: Option<String>,
    pub unloaded: Option<String>,
    pub event: Option<String>,
    pub signaller: Option<String>,
}

/// One `invoke` call as the plugin saw it.
#[derive(Debug, Clone)]
pub struct InvocationRecord {
    pub method: String,
    pub event: String,
    pub data: Map<String, Value>,
}

/// A plugin whose hook results and side effects are scripted up front and
/// whose every interaction with the runtime is recorded.
pub struct TestPlugin {
    name: String,
    uniquename: String,
    dependency: Vec<Vec<String>>,
    critical: bool,
    load_result: AtomicBool,
    unload_result: bool,
    prepare_result: bool,
    failing_methods: Vec<String>,
    subscribe_on_prepare: Vec<(String, String)>,
    observe_on_prepare: Option<String>,
    observed_active: Mutex<Option<bool>>,
    loads: AtomicUsize,
    unloads: AtomicUsize,
    prepares: AtomicUsize,
    invocations: Mutex<Vec<InvocationRecord>>,
    signals: Mutex<Vec<SignalRecord>>,
}

impl TestPlugin {
    pub fn new(uniquename: &str) -> Self {
        Self {
            name: format!("{uniquename} plugin"),
            uniquename: uniquename.to_owned(),
            dependency: Vec::new(),
            critical: false,
            load_result: AtomicBool::new(true),
            unload_result: true,
            prepare_result: true,
            failing_methods: Vec::new(),
            subscribe_on_prepare: Vec::new(),
            observe_on_prepare: None,
            observed_active: Mutex::new(None),
            loads: AtomicUsize::new(0),
            unloads: AtomicUsize::new(0),
            prepares: AtomicUsize::new(0),
            invocations: Mutex::new(Vec::new()),
            signals: Mutex::new(Vec::new()),
        }
    }

    pub fn with_dependency(mut self, dependency: Vec<Vec<String>>) -> Self {
        self.dependency = dependency;
        self
    }

    pub fn as_critical(mut self) -> Self {
        self.critical = true;
        self
    }

    pub fn with_load_result(self, result: bool) -> Self {
        self.load_result.store(result, Ordering::SeqCst);
        self
    }

    pub fn with_unload_result(mut self, result: bool) -> Self {
        self.unload_result = result;
        self
    }

    pub fn with_prepare_result(mut self, result: bool) -> Self {
        self.prepare_result = result;
        self
    }

    /// Make `invoke` report failure for the given method.
    pub fn with_invoke_result(mut self, method: &str, result: bool) -> Self {
        if !result {
            self.failing_methods.push(method.to_owned());
        }
        self
    }

    /// Subscribe to an event during `prepare`, the canonical place for it.
    pub fn subscribing_on_prepare(mut self, event: &str, method: &str) -> Self {
        self.subscribe_on_prepare
            .push((event.to_owned(), method.to_owned()));
        self
    }

    /// During `prepare`, record whether the named plugin is active.
    pub fn observing_on_prepare(mut self, uniquename: &str) -> Self {
        self.observe_on_prepare = Some(uniquename.to_owned());
        self
    }

    pub fn set_load_result(&self, result: bool) {
        self.load_result.store(result, Ordering::SeqCst);
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn unloads(&self) -> usize {
        self.unloads.load(Ordering::SeqCst)
    }

    pub fn prepares(&self) -> usize {
        self.prepares.load(Ordering::SeqCst)
    }

    pub fn invocations(&self) -> Vec<InvocationRecord> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn signals(&self) -> Vec<SignalRecord> {
        self.signals.lock().unwrap().clone()
    }

    pub fn observed_active(&self) -> Option<bool> {
        *self.observed_active.lock().unwrap()
    }
}

impl Plugin for TestPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn uniquename(&self) -> &str {
        &self.uniquename
    }

    fn dependency(&self) -> Vec<Vec<String>> {
        self.dependency.clone()
    }

    fn critical(&self) -> bool {
        self.critical
    }

    fn load(&self, _host: &dyn PluginHost) -> bool {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.load_result.load(Ordering::SeqCst)
    }

    fn unload(&self, _host: &dyn PluginHost) -> bool {
        self.unloads.fetch_add(1, Ordering::SeqCst);
        self.unload_result
    }

    fn prepare(&self, host: &dyn PluginHost) -> bool {
        self.prepares.fetch_add(1, Ordering::SeqCst);
        if let Some(target) = &self.observe_on_prepare {
            *self.observed_active.lock().unwrap() = Some(host.is_active(target));
        }
        let mut ok = self.prepare_result;
        for (event, method) in &self.subscribe_on_prepare {
            ok &= host.subscribe(&self.uniquename, event, method);
        }
        ok
    }

    fn signal(&self, args: &SignalArgs<'_>) {
        self.signals.lock().unwrap().push(SignalRecord {
            loaded: args.loaded.map(str::to_owned),
            unloaded: args.unloaded.map(str::to_owned),
            event: args.event.map(str::to_owned),
            signaller: args.signaller.map(str::to_owned),
        });
    }

    fn invoke(&self, method: &str, payload: &EventPayload) -> bool {
        self.invocations.lock().unwrap().push(InvocationRecord {
            method: method.to_owned(),
            event: payload.event.clone(),
            data: payload.data.clone(),
        });
        !self.failing_methods.iter().any(|m| m == method)
    }
}
