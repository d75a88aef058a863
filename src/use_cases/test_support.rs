use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crate::domain::entities::{SessionKey, SessionRecord};
use crate::domain::ports::{Clock, ProbeLogSink, SessionConnection, StoreConnector};
use crate::domain::entities::ProbeLogLine;

pub(crate) type HashTable = Arc<Mutex<HashMap<String, HashMap<String, String>>>>;

// Shared fixed time source for deterministic error lines.
#[derive(Clone)]
pub(crate) struct FixedClock(pub(crate) DateTime<FixedOffset>);

impl FixedClock {
    pub(crate) fn at(rfc3339: &str) -> Self {
        Self(DateTime::parse_from_rfc3339(rfc3339).expect("valid rfc3339 timestamp"))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub connect: bool,
    pub write: bool,
    pub read: bool,
}

// In-memory stand-in for the cluster that records every call.
#[derive(Clone)]
pub(crate) struct RecordingConnector {
    hashes: HashTable,
    written: Arc<Mutex<Vec<String>>>,
    connects: Arc<AtomicUsize>,
    reads: Arc<AtomicUsize>,
    failures: FailureFlags,
}

impl RecordingConnector {
    pub(crate) fn new() -> Self {
        Self {
            hashes: Arc::new(Mutex::new(HashMap::new())),
            written: Arc::new(Mutex::new(Vec::new())),
            connects: Arc::new(AtomicUsize::new(0)),
            reads: Arc::new(AtomicUsize::new(0)),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn written_keys(&self) -> Vec<String> {
        self.written.lock().expect("written mutex poisoned").clone()
    }

    pub(crate) fn hash(&self, key: &str) -> Option<HashMap<String, String>> {
        let guard = self.hashes.lock().expect("hashes mutex poisoned");
        guard.get(key).cloned()
    }

    pub(crate) fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub(crate) fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreConnector for RecordingConnector {
    async fn connect(&self) -> Result<Box<dyn SessionConnection>, String> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.failures.connect {
            return Err("Connection refused (os error 111)".to_string());
        }

        Ok(Box::new(RecordingConnection {
            store: self.clone(),
        }))
    }
}

struct RecordingConnection {
    store: RecordingConnector,
}

#[async_trait]
impl SessionConnection for RecordingConnection {
    async fn write_session(
        &mut self,
        key: &SessionKey,
        record: &SessionRecord,
    ) -> Result<(), String> {
        if self.store.failures.write {
            return Err("write failed".to_string());
        }

        let hash = record
            .fields()
            .iter()
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect();
        let mut guard = self.store.hashes.lock().expect("hashes mutex poisoned");
        guard.insert(key.to_string(), hash);
        self.store
            .written
            .lock()
            .expect("written mutex poisoned")
            .push(key.to_string());
        Ok(())
    }

    async fn read_session(&mut self, key: &SessionKey) -> Result<HashMap<String, String>, String> {
        self.store.reads.fetch_add(1, Ordering::SeqCst);
        if self.store.failures.read {
            return Err("read failed".to_string());
        }

        let guard = self.store.hashes.lock().expect("hashes mutex poisoned");
        Ok(guard.get(key.as_str()).cloned().unwrap_or_default())
    }
}

// Captures probe lines instead of printing them.
#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    lines: Arc<Mutex<Vec<ProbeLogLine>>>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lines(&self) -> Vec<ProbeLogLine> {
        self.lines.lock().expect("lines mutex poisoned").clone()
    }
}

impl ProbeLogSink for RecordingSink {
    fn emit(&self, line: &ProbeLogLine) {
        self.lines
            .lock()
            .expect("lines mutex poisoned")
            .push(line.clone());
    }
}
