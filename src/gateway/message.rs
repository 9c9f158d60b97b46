//! Wire types for the receive endpoint.
//!
//! Terminals speak PascalCase JSON; every response carries the request id
//! back, either the one the caller supplied or a generated one.

use crate::config::REQUIRED_FIELDS;
use serde::Serialize;
use serde_json::{Map, Value};

/// Response envelope for `POST /api/receive`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiveResponse {
    pub request_id: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReceiveResponse {
    pub fn ok(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            code: "ok".to_string(),
            message: None,
        }
    }

    pub fn error(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            code: "error".to_string(),
            message: Some(message.into()),
        }
    }
}

/// One row of `GET /api/terminals`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TerminalSummary {
    pub id_number: String,
    pub message_count: usize,
    pub last_receive_time: String,
}

/// Required fields absent from the posted body, in declaration order.
pub fn missing_fields(body: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !body.contains_key(*field))
        .collect()
}

/// Store key for a terminal id. String ids keep their value, anything else
/// is keyed by its JSON rendering (terminals are not trusted to send clean
/// data).
pub fn id_number_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
