use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crate::domain::entities::{SessionKey, SessionRecord};
use crate::domain::entities::ProbeLogLine;

// Port for opening a new store connection; called once per invocation.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn SessionConnection>, String>;
}

// Port for the hash operations the probe times.
#[async_trait]
pub trait SessionConnection: Send {
    async fn write_session(
        &mut self,
        key: &SessionKey,
        record: &SessionRecord,
    ) -> Result<(), String>;
    async fn read_session(&mut self, key: &SessionKey) -> Result<HashMap<String, String>, String>;
}

// Port for the one structured line emitted per invocation.
pub trait ProbeLogSink: Send + Sync {
    fn emit(&self, line: &ProbeLogLine);
}

// Port for retrieving the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

#[async_trait]
impl<T: StoreConnector + ?Sized> StoreConnector for Arc<T> {
    async fn connect(&self) -> Result<Box<dyn SessionConnection>, String> {
        (**self).connect().await
    }
}

impl<T: ProbeLogSink + ?Sized> ProbeLogSink for Arc<T> {
    fn emit(&self, line: &ProbeLogLine) {
        (**self).emit(line)
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}
