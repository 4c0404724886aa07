use crate::attributes::{AttributeValue, Attributes};
use crate::capabilities::{ErrorAttributer, ErrorClasser, Noticeable, StackTracer};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Ready-made error for callers that want to control exactly how an error is
/// recorded, without defining their own type.
///
/// ```
/// use apm_errors::StandardError;
///
/// let err = StandardError::new("error message: something went very wrong")
///     .with_class("errors are aggregated by class")
///     .with_attribute("important_number", 97232)
///     .with_attribute("relevant_string", "zap");
///
/// assert_eq!(err.to_string(), "error message: something went very wrong");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardError {
    /// Returned verbatim as the error's display text
    pub message: String,
    /// Aggregation label; empty means no custom classification
    #[serde(default)]
    pub class: String,
    /// Extra context, validated by the collector when noticed
    #[serde(default)]
    pub attributes: Attributes,
}

impl StandardError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_class<S: Into<String>>(mut self, class: S) -> Self {
        self.class = class.into();
        self
    }

    #[must_use]
    pub fn with_attribute<K: Into<String>, V: Into<AttributeValue>>(mut self, key: K, value: V) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StandardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for StandardError {}

/// Always the empty trace; wrap in [`crate::Traced`] to attach one.
impl StackTracer for StandardError {
    fn stack_trace(&self) -> Cow<'_, [usize]> {
        Cow::Borrowed(&[])
    }
}

impl ErrorClasser for StandardError {
    fn error_class(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.class)
    }
}

impl ErrorAttributer for StandardError {
    fn error_attributes(&self) -> Cow<'_, Attributes> {
        Cow::Borrowed(&self.attributes)
    }
}

impl Noticeable for StandardError {
    fn as_stack_tracer(&self) -> Option<&dyn StackTracer> {
        Some(self)
    }

    fn as_error_classer(&self) -> Option<&dyn ErrorClasser> {
        Some(self)
    }

    fn as_error_attributer(&self) -> Option<&dyn ErrorAttributer> {
        Some(self)
    }
}
