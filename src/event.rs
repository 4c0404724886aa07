use crate::attributes::Attributes;
use crate::error::Result;
use crate::stack::StackTrace;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Event type reported for every recorded error
pub const ERROR_EVENT_TYPE: &str = "TransactionError";

/// A recorded error, ready to be serialized for the backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEvent {
    #[serde(rename = "type")]
    pub event_type: &'static str,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "error.class")]
    pub class: String,
    #[serde(rename = "error.message")]
    pub message: String,
    #[serde(rename = "error.expected")]
    pub expected: bool,
    #[serde(rename = "userAttributes")]
    pub attributes: Attributes,
    #[serde(rename = "stackTrace", skip_serializing_if = "StackTrace::is_empty")]
    pub stack_trace: StackTrace,
}

/// Everything collected since the previous harvest
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Harvest {
    pub events: Vec<ErrorEvent>,
    /// Errors that reached the collector while enabled: recorded, ignored,
    /// dropped or refused
    pub seen: usize,
    /// Errors matched by an ignore rule
    pub ignored: usize,
    /// Errors lost because the buffer was full
    pub dropped: usize,
    /// Errors refused by high security or the `reject` attribute policy
    pub refused: usize,
}

impl ErrorEvent {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Harvest {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.seen == 0
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
