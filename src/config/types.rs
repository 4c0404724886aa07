use serde::{Deserialize, Serialize};

/// Default config file name looked up by the CLI
pub const DEFAULT_CONFIG_FILE: &str = "apm-errors.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AgentConfig {
    /// Error collector settings
    #[serde(default)]
    pub error_collector: ErrorCollectorConfig,
    /// Rules applied to error attributes
    #[serde(default)]
    pub attributes: AttributeConfig,
}

/// Error collector settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ErrorCollectorConfig {
    /// Whether noticed errors are recorded at all
    pub enabled: bool,
    /// Strip messages and refuse error attributes
    pub high_security: bool,
    /// Capacity of the event buffer between harvests
    pub max_error_events: usize,
    /// How the default class is derived from the type name
    pub class_naming: ClassNaming,
    /// Classes that are never recorded
    pub ignore_classes: Vec<String>,
    /// Regex patterns; matching messages are never recorded
    pub ignore_messages: Vec<String>,
    /// Classes recorded with `error.expected = true`
    pub expected_classes: Vec<String>,
    /// Regex patterns; matching messages are recorded as expected
    pub expected_messages: Vec<String>,
}

impl Default for ErrorCollectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            high_security: false,
            max_error_events: 100,
            class_naming: ClassNaming::Full,
            ignore_classes: Vec::new(),
            ignore_messages: Vec::new(),
            expected_classes: Vec::new(),
            expected_messages: Vec::new(),
        }
    }
}

/// Rules applied to error attributes
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AttributeConfig {
    /// Values kept per error, in sorted key order. Every scalar inside a
    /// nested map counts toward the limit.
    pub max_attributes: usize,
    /// Longest accepted key, in bytes
    pub max_key_bytes: usize,
    /// String values are truncated to this many bytes
    pub max_value_bytes: usize,
    /// Whether nested map values are accepted
    pub allow_nested: bool,
    /// How many map levels a nested attribute may have
    pub max_nesting_depth: usize,
    /// What happens to an attribute that fails validation
    pub on_invalid: InvalidAttributePolicy,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            max_attributes: 64,
            max_key_bytes: 255,
            max_value_bytes: 255,
            allow_nested: false,
            max_nesting_depth: 4,
            on_invalid: InvalidAttributePolicy::Drop,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassNaming {
    /// Full type path, e.g. `std::io::error::Error`
    #[default]
    Full,
    /// Last path segment only, e.g. `Error`
    Short,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidAttributePolicy {
    /// Log and skip the attribute
    #[default]
    Drop,
    /// Refuse the whole error
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AgentConfig = toml::from_str("").unwrap();
        assert_eq!(config, AgentConfig::default());
        assert!(config.error_collector.enabled);
        assert_eq!(config.attributes.max_attributes, 64);
    }

    #[test]
    fn test_partial_sections_merge_with_defaults() {
        let config: AgentConfig = toml::from_str(
            r#"
[error_collector]
class_naming = "short"
ignore_classes = ["NotFound"]

[attributes]
on_invalid = "reject"
"#,
        )
        .unwrap();

        assert_eq!(config.error_collector.class_naming, ClassNaming::Short);
        assert_eq!(config.error_collector.ignore_classes, vec!["NotFound"]);
        assert_eq!(config.error_collector.max_error_events, 100);
        assert_eq!(config.attributes.on_invalid, InvalidAttributePolicy::Reject);
        assert_eq!(config.attributes.max_key_bytes, 255);
        assert_eq!(config.attributes.max_nesting_depth, 4);
    }
}
