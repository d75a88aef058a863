use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::PhaseTimings;

// Invocation event; every field is optional and unknown fields are ignored.
// `request_id` is caller-supplied and may be any JSON value.
#[derive(Debug, Default, Deserialize)]
pub struct InvocationEvent {
    #[serde(default)]
    pub request_id: Option<Value>,
}

impl InvocationEvent {
    // Caller id as printable text; strings are taken without quotes.
    pub fn caller_request_id(&self) -> Option<String> {
        match self.request_id.as_ref()? {
            Value::Null => None,
            Value::String(id) => Some(id.clone()),
            other => Some(other.to_string()),
        }
    }
}

// Platform-side context for one invocation.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub request_id: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ResponseHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: String,
}

// Success payload; `body` carries the phase timings as a JSON string.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse {
    pub status_code: u16,
    pub status_description: String,
    pub is_base64_encoded: bool,
    pub headers: ResponseHeaders,
    pub body: String,
}

impl SuccessResponse {
    pub fn from_timings(timings: &PhaseTimings) -> Self {
        let body = serde_json::json!({
            "write": timings.write,
            "read": timings.read,
        });

        Self {
            status_code: 200,
            status_description: "200 Ok".to_string(),
            is_base64_encoded: false,
            headers: ResponseHeaders {
                content_type: "application/json".to_string(),
            },
            body: body.to_string(),
        }
    }
}

// Decoded form of `SuccessResponse::body`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TimingBody {
    pub write: f64,
    pub read: f64,
}

// Simple error envelope returned when any phase fails.
#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

// Value handed back to the caller of an invocation.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum InvocationResponse {
    Success(SuccessResponse),
    Failure(ErrorResponse),
}
