use crate::error::{ApmError, Result};
use std::fs;
use std::path::Path;

/// Generate the default apm-errors.toml template with every setting documented
pub fn generate_default_config_template() -> String {
    r#"# apm-errors configuration
# Controls which errors are recorded and how their attributes are checked.

[error_collector]
# Set to false to refuse every noticed error
enabled = true
# Replace messages with a placeholder and refuse error attributes
high_security = false
# Events kept between harvests; extra errors are counted as dropped
max_error_events = 100
# Default class for errors without one: "full" type path or "short" name
class_naming = "full"
# Classes that are never recorded
ignore_classes = []
# Regex patterns; errors whose message matches are never recorded
ignore_messages = []
# Classes recorded with error.expected = true
expected_classes = []
# Regex patterns; matching messages are recorded as expected
expected_messages = []

[attributes]
# Values kept per error (sorted by key, nested values included)
max_attributes = 64
# Longest accepted key, in bytes
max_key_bytes = 255
# String values are truncated to this many bytes
max_value_bytes = 255
# Accept nested map values
allow_nested = false
# Map levels allowed when allow_nested is set
max_nesting_depth = 4
# "drop" skips invalid attributes, "reject" refuses the whole error
on_invalid = "drop"
"#
    .to_string()
}

/// Write the default template to `path`.
///
/// Returns `Ok(false)` when the file already exists and `force` is not set.
pub fn ensure_config_file_exists<P: AsRef<Path>>(path: P, force: bool) -> Result<bool> {
    let path = path.as_ref();

    if path.exists() && !force {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                ApmError::invalid_config(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    fs::write(path, generate_default_config_template())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::AgentConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: AgentConfig = toml::from_str(&generate_default_config_template()).unwrap();
        assert_eq!(config, AgentConfig::default());
    }

    #[test]
    fn test_existing_file_is_kept_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("apm-errors.toml");

        assert!(ensure_config_file_exists(&path, false).unwrap());
        fs::write(&path, "# custom").unwrap();

        assert!(!ensure_config_file_exists(&path, false).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# custom");

        assert!(ensure_config_file_exists(&path, true).unwrap());
        assert!(fs::read_to_string(&path).unwrap().contains("[error_collector]"));
    }
}
