//! DFIR-IRIS response envelope
//!
//! Every endpoint answers with `{"status": ..., "message": ..., "data": ...}`.
//! A status other than `"success"` is a failure regardless of the HTTP code.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Status string marking a successful envelope
pub const STATUS_SUCCESS: &str = "success";

/// Decoded response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    /// Verbatim JSON text of `data`; `None` when the field is absent or `null`
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Human-readable failure text: the message, followed by `" - <data>"`
    /// when the server attached non-null detail in `data`.
    pub fn failure_message(&self) -> String {
        match &self.data {
            Some(data) => format!("{} - {}", self.message, raw_text(data)),
            None => self.message.clone(),
        }
    }
}

/// Decode a response body into an [`Envelope`]
pub fn decode(bytes: &[u8]) -> Result<Envelope> {
    serde_json::from_slice(bytes).map_err(Error::Decode)
}

// Strings are appended without their JSON quotes, everything else as sent.
fn raw_text(data: &RawValue) -> String {
    serde_json::from_str::<String>(data.get()).unwrap_or_else(|_| data.get().to_string())
}
