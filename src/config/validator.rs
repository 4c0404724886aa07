use crate::config::types::AgentConfig;
use crate::error::{ApmError, Result};
use regex::Regex;
use std::path::Path;

/// Trait for configuration validation
pub trait ConfigValidator: Send + Sync {
    type Config;

    /// Validate configuration
    fn validate(&self, config: &Self::Config) -> Result<()>;
}

/// Configuration validator implementation
pub struct ConfigValidatorImpl;

impl ConfigValidator for ConfigValidatorImpl {
    type Config = AgentConfig;

    /// Validate configuration (uses enhanced validation with default context)
    fn validate(&self, config: &AgentConfig) -> Result<()> {
        self.validate_with_context(config, "configuration")
    }
}

impl ConfigValidatorImpl {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validation with the config source named in every message
    pub fn validate_with_context<P: AsRef<Path>>(
        &self,
        config: &AgentConfig,
        config_path: P,
    ) -> Result<()> {
        let source = config_path.as_ref().to_string_lossy();
        let collector = &config.error_collector;
        let attributes = &config.attributes;

        if collector.max_error_events == 0 || collector.max_error_events > 10_000 {
            return Err(ApmError::invalid_config(format!(
                "error_collector.max_error_events must be between 1 and 10000 in {}",
                source
            )));
        }

        if attributes.max_attributes == 0 || attributes.max_attributes > 256 {
            return Err(ApmError::invalid_config(format!(
                "attributes.max_attributes must be between 1 and 256 in {}",
                source
            )));
        }

        for (name, value) in [
            ("max_key_bytes", attributes.max_key_bytes),
            ("max_value_bytes", attributes.max_value_bytes),
        ] {
            if value == 0 || value > 4096 {
                return Err(ApmError::invalid_config(format!(
                    "attributes.{} must be between 1 and 4096 in {}",
                    name, source
                )));
            }
        }

        if attributes.max_nesting_depth == 0 || attributes.max_nesting_depth > 16 {
            return Err(ApmError::invalid_config(format!(
                "attributes.max_nesting_depth must be between 1 and 16 in {}",
                source
            )));
        }

        for (field, patterns) in [
            ("ignore_messages", &collector.ignore_messages),
            ("expected_messages", &collector.expected_messages),
        ] {
            for pattern in patterns {
                if let Err(e) = Regex::new(pattern) {
                    return Err(ApmError::invalid_config(format!(
                        "Invalid pattern '{}' in error_collector.{} of {}: {}",
                        pattern, field, source, e
                    )));
                }
            }
        }

        if let Some(class) = collector
            .ignore_classes
            .iter()
            .find(|class| collector.expected_classes.contains(*class))
        {
            return Err(ApmError::invalid_config(format!(
                "Class '{}' is listed in both ignore_classes and expected_classes in {}",
                class, source
            )));
        }

        Ok(())
    }
}

impl Default for ConfigValidatorImpl {
    fn default() -> Self {
        Self::new()
    }
}
