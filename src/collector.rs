//! The error-reporting entry point.
//!
//! [`ErrorCollector::notice_error`] probes an error for its capabilities,
//! applies the configured filters and attribute rules, and buffers the
//! resulting [`ErrorEvent`] until the next [`ErrorCollector::harvest`].

use crate::attributes::{validate_attributes, AttributeValidator, DefaultAttributeValidator};
use crate::capabilities::{Noticeable, Plain};
use crate::class::ClassPolicy;
use crate::config::types::{AgentConfig, AttributeConfig, ErrorCollectorConfig};
use crate::config::validator::{ConfigValidator, ConfigValidatorImpl};
use crate::error::{ApmError, Result};
use crate::event::{ErrorEvent, Harvest, ERROR_EVENT_TYPE};
use crate::probe::probe;
use chrono::Utc;
use regex::Regex;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Message recorded in place of the real one under high security
pub const HIGH_SECURITY_MESSAGE: &str = "message removed by high security setting";

/// What happened to a noticed error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeOutcome {
    /// Buffered for the next harvest
    Recorded,
    /// Matched an ignore rule
    Ignored,
    /// Buffer was full
    Dropped,
}

#[derive(Debug, Default)]
struct Buffer {
    events: Vec<ErrorEvent>,
    seen: usize,
    ignored: usize,
    dropped: usize,
    refused: usize,
}

/// In-process error collector.
///
/// Shared freely between threads; the event buffer is the only mutable state.
pub struct ErrorCollector {
    settings: ErrorCollectorConfig,
    attribute_rules: AttributeConfig,
    ignore_messages: Vec<Regex>,
    expected_messages: Vec<Regex>,
    class_policy: Box<dyn ClassPolicy>,
    validator: Box<dyn AttributeValidator>,
    buffer: Mutex<Buffer>,
}

impl ErrorCollector {
    /// Create a collector with the default class policy and attribute rules
    /// for `config`
    pub fn new(config: AgentConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> ErrorCollectorBuilder {
        ErrorCollectorBuilder::new()
    }

    /// Record an error.
    ///
    /// Fails only when collection is disabled, when high security forbids the
    /// error's attributes, or when an attribute is invalid under the `reject`
    /// policy. Ignored and dropped errors are not failures.
    pub fn notice_error(&self, err: &dyn Noticeable) -> Result<NoticeOutcome> {
        if !self.settings.enabled {
            debug!("error collection disabled, refusing error");
            return Err(ApmError::Disabled);
        }

        let noticed = probe(err, &*self.class_policy);

        if self.settings.high_security && !noticed.attributes.is_empty() {
            return self.refuse(ApmError::HighSecurityEnabled);
        }

        if self.is_ignored(&noticed.class, &noticed.message) {
            debug!(class = %noticed.class, "ignoring error");
            let mut buffer = self.buffer();
            buffer.seen += 1;
            buffer.ignored += 1;
            return Ok(NoticeOutcome::Ignored);
        }

        let attributes = match validate_attributes(
            &*self.validator,
            &noticed.attributes,
            self.attribute_rules.max_attributes,
            self.attribute_rules.on_invalid,
        ) {
            Ok(attributes) => attributes,
            Err(err) => return self.refuse(err),
        };

        let expected = self.is_expected(&noticed.class, &noticed.message);

        let message = if self.settings.high_security {
            HIGH_SECURITY_MESSAGE.to_string()
        } else {
            noticed.message
        };

        let event = ErrorEvent {
            event_type: ERROR_EVENT_TYPE,
            timestamp: Utc::now(),
            class: noticed.class,
            message,
            expected,
            attributes,
            stack_trace: noticed.stack_trace,
        };

        let mut buffer = self.buffer();
        buffer.seen += 1;
        if buffer.events.len() >= self.settings.max_error_events {
            buffer.dropped += 1;
            debug!(class = %event.class, capacity = self.settings.max_error_events, "error buffer full, dropping event");
            return Ok(NoticeOutcome::Dropped);
        }

        debug!(class = %event.class, expected, "recorded error");
        buffer.events.push(event);
        Ok(NoticeOutcome::Recorded)
    }

    /// Record any `std::error::Error`, which exposes no capabilities
    pub fn notice_plain<E: std::error::Error + ?Sized>(&self, err: &E) -> Result<NoticeOutcome> {
        self.notice_error(&Plain(err))
    }

    /// Drain buffered events and reset the counters
    pub fn harvest(&self) -> Harvest {
        let buffer = std::mem::take(&mut *self.buffer());

        if buffer.dropped > 0 {
            warn!(
                dropped = buffer.dropped,
                capacity = self.settings.max_error_events,
                "error events were dropped since the last harvest"
            );
        }

        Harvest {
            events: buffer.events,
            seen: buffer.seen,
            ignored: buffer.ignored,
            dropped: buffer.dropped,
            refused: buffer.refused,
        }
    }

    /// Number of events waiting for the next harvest
    pub fn pending(&self) -> usize {
        self.buffer().events.len()
    }

    pub fn settings(&self) -> &ErrorCollectorConfig {
        &self.settings
    }

    /// Count an error that reached the collector but was refused
    fn refuse(&self, err: ApmError) -> Result<NoticeOutcome> {
        debug!(error = %err, "refusing error");
        let mut buffer = self.buffer();
        buffer.seen += 1;
        buffer.refused += 1;
        Err(err)
    }

    fn is_ignored(&self, class: &str, message: &str) -> bool {
        self.settings.ignore_classes.iter().any(|c| c == class)
            || self.ignore_messages.iter().any(|re| re.is_match(message))
    }

    fn is_expected(&self, class: &str, message: &str) -> bool {
        self.settings.expected_classes.iter().any(|c| c == class)
            || self.expected_messages.iter().any(|re| re.is_match(message))
    }

    fn buffer(&self) -> MutexGuard<'_, Buffer> {
        // Buffer updates never leave it half-written, so a poisoned lock is safe to reuse
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builder for ErrorCollector
pub struct ErrorCollectorBuilder {
    config: AgentConfig,
    class_policy: Option<Box<dyn ClassPolicy>>,
    validator: Option<Box<dyn AttributeValidator>>,
}

impl ErrorCollectorBuilder {
    pub fn new() -> Self {
        Self {
            config: AgentConfig::default(),
            class_policy: None,
            validator: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the policy selected by `error_collector.class_naming`
    #[must_use]
    pub fn class_policy<P: ClassPolicy + 'static>(mut self, policy: P) -> Self {
        self.class_policy = Some(Box::new(policy));
        self
    }

    /// Override the default attribute rules
    #[must_use]
    pub fn attribute_validator<V: AttributeValidator + 'static>(mut self, validator: V) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn build(self) -> Result<ErrorCollector> {
        ConfigValidatorImpl::new().validate(&self.config)?;

        let AgentConfig {
            error_collector: settings,
            attributes: attribute_rules,
        } = self.config;

        let ignore_messages = compile_patterns(&settings.ignore_messages)?;
        let expected_messages = compile_patterns(&settings.expected_messages)?;

        let class_policy = self
            .class_policy
            .unwrap_or_else(|| settings.class_naming.policy());
        let validator = self
            .validator
            .unwrap_or_else(|| Box::new(DefaultAttributeValidator::from_config(&attribute_rules)));

        Ok(ErrorCollector {
            settings,
            attribute_rules,
            ignore_messages,
            expected_messages,
            class_policy,
            validator,
            buffer: Mutex::new(Buffer::default()),
        })
    }
}

impl Default for ErrorCollectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(ApmError::from))
        .collect()
}
