use crate::config::types::{AgentConfig, ClassNaming, InvalidAttributePolicy};
use crate::error::Result;

/// Builder for AgentConfig to improve API ergonomics
pub struct AgentConfigBuilder {
    config: AgentConfig,
}

impl AgentConfigBuilder {
    /// Create a new config builder
    pub fn new() -> Self {
        Self {
            config: AgentConfig::default(),
        }
    }

    /// Enable or disable error collection
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.error_collector.enabled = enabled;
        self
    }

    #[must_use]
    pub fn high_security(mut self, on: bool) -> Self {
        self.config.error_collector.high_security = on;
        self
    }

    /// Set the event buffer capacity
    #[must_use]
    pub fn max_error_events(mut self, max: usize) -> Self {
        self.config.error_collector.max_error_events = max;
        self
    }

    #[must_use]
    pub fn class_naming(mut self, naming: ClassNaming) -> Self {
        self.config.error_collector.class_naming = naming;
        self
    }

    /// Add a class that is never recorded
    #[must_use]
    pub fn ignore_class<S: Into<String>>(mut self, class: S) -> Self {
        self.config.error_collector.ignore_classes.push(class.into());
        self
    }

    /// Add a regex; errors whose message matches are never recorded
    #[must_use]
    pub fn ignore_message<S: Into<String>>(mut self, pattern: S) -> Self {
        self.config.error_collector.ignore_messages.push(pattern.into());
        self
    }

    #[must_use]
    pub fn expected_class<S: Into<String>>(mut self, class: S) -> Self {
        self.config.error_collector.expected_classes.push(class.into());
        self
    }

    #[must_use]
    pub fn expected_message<S: Into<String>>(mut self, pattern: S) -> Self {
        self.config.error_collector.expected_messages.push(pattern.into());
        self
    }

    #[must_use]
    pub fn max_attributes(mut self, max: usize) -> Self {
        self.config.attributes.max_attributes = max;
        self
    }

    #[must_use]
    pub fn allow_nested_attributes(mut self, allow: bool) -> Self {
        self.config.attributes.allow_nested = allow;
        self
    }

    #[must_use]
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.config.attributes.max_nesting_depth = depth;
        self
    }

    #[must_use]
    pub fn on_invalid_attribute(mut self, policy: InvalidAttributePolicy) -> Self {
        self.config.attributes.on_invalid = policy;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AgentConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for AgentConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let config = AgentConfig::builder()
            .max_error_events(5)
            .class_naming(ClassNaming::Short)
            .ignore_class("NotFound")
            .expected_message("^retry")
            .on_invalid_attribute(InvalidAttributePolicy::Reject)
            .build()
            .unwrap();

        assert_eq!(config.error_collector.max_error_events, 5);
        assert_eq!(config.error_collector.class_naming, ClassNaming::Short);
        assert_eq!(config.error_collector.ignore_classes, vec!["NotFound"]);
        assert_eq!(config.error_collector.expected_messages, vec!["^retry"]);
        assert_eq!(config.attributes.on_invalid, InvalidAttributePolicy::Reject);
    }

    #[test]
    fn test_builder_validates() {
        assert!(AgentConfig::builder().ignore_message("[").build().is_err());
    }
}
