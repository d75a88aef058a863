use std::fmt;

use chrono::{DateTime, FixedOffset};
use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{IPv4, SafeEmail};
use fake::faker::job::en::Title;
use fake::faker::name::en::Name;
use serde::Serialize;
use uuid::Uuid;

// Prefix shared by every probe key written to the cluster.
pub const SESSION_KEY_PREFIX: &str = "session_";

// Millisecond precision with a `+HH:MM` offset.
const ERROR_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

// Hash key for the record written by a single invocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    // Fresh key derived from a random v4 UUID.
    pub fn generate() -> Self {
        Self(format!("{SESSION_KEY_PREFIX}:{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Synthetic session record written to the cluster as a flat hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    pub name: String,
    pub email: String,
    pub ip_address: String,
    pub company: String,
    pub job: String,
}

impl SessionRecord {
    // Build a record filled with fake but realistic-looking values.
    pub fn synthetic() -> Self {
        Self {
            name: Name().fake(),
            email: SafeEmail().fake(),
            ip_address: IPv4().fake(),
            company: CompanyName().fake(),
            job: Title().fake(),
        }
    }

    // Field/value pairs in the order they are written to the hash.
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("ip_address", self.ip_address.as_str()),
            ("company", self.company.as_str()),
            ("job", self.job.as_str()),
        ]
    }
}

// Elapsed wall-clock seconds for each probe phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseTimings {
    pub connection: f64,
    pub write: f64,
    pub read: f64,
}

// Structured stdout line, one per invocation.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum ProbeLogLine {
    #[serde(rename = "ECL", rename_all = "camelCase")]
    Success {
        request_id: String,
        connection: f64,
        write: f64,
        read: f64,
    },
    #[serde(rename = "ECL-ERROR", rename_all = "camelCase")]
    Failure {
        timestamp: String,
        request_id: String,
        error: String,
    },
}

impl ProbeLogLine {
    pub fn success(request_id: &str, timings: &PhaseTimings) -> Self {
        ProbeLogLine::Success {
            request_id: request_id.to_string(),
            connection: timings.connection,
            write: timings.write,
            read: timings.read,
        }
    }

    pub fn failure(at: DateTime<FixedOffset>, request_id: &str, error: &str) -> Self {
        ProbeLogLine::Failure {
            timestamp: at.format(ERROR_TIMESTAMP_FORMAT).to_string(),
            request_id: request_id.to_string(),
            error: error.to_string(),
        }
    }
}
