use std::io::{self, Write};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};

use crate::domain::entities::ProbeLogLine;
use crate::domain::ports::{Clock, ProbeLogSink, StoreConnector};

// Application state shared by the invocation endpoint.
// Holds how to connect, never a connection.
#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<dyn StoreConnector>,
    pub sink: Arc<dyn ProbeLogSink>,
    pub clock: Arc<dyn Clock>,
}

// Writes each probe line as compact JSON on stdout.
#[derive(Clone)]
pub struct StdoutLogSink;

impl ProbeLogSink for StdoutLogSink {
    fn emit(&self, line: &ProbeLogLine) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(error) = write_line(&mut handle, line) {
            tracing::error!(%error, "failed to write probe log line");
        }
    }
}

// One JSON document per line, flushed so a closed pipe surfaces here.
pub(crate) fn write_line<W: Write>(writer: &mut W, line: &ProbeLogLine) -> io::Result<()> {
    let json = serde_json::to_string(line).map_err(io::Error::other)?;
    writeln!(writer, "{json}")?;
    writer.flush()
}

// System clock adapter in the host's local offset.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
