use crate::config::types::AgentConfig;
use crate::config::validator::{ConfigValidator, ConfigValidatorImpl};
use crate::error::{ApmError, Result};
use std::path::Path;
use tracing::debug;

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<AgentConfig>;
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<AgentConfig>;
}

/// Default configuration loader implementation
pub struct DefaultConfigLoader;

impl ConfigLoader for DefaultConfigLoader {
    /// Load configuration from a TOML file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<AgentConfig> {
        let content = std::fs::read_to_string(&path).map_err(|_| ApmError::ConfigNotFound {
            path: path.as_ref().to_path_buf(),
        })?;

        let config: AgentConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load and validate, with the file path in every error message
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<AgentConfig> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ApmError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref).map_err(ApmError::Io)?;

        let config: AgentConfig = toml::from_str(&content).map_err(|e| {
            ApmError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        ConfigValidatorImpl::new().validate_with_context(&config, path_ref)?;
        debug!(path = %path_ref.display(), "loaded configuration");

        Ok(config)
    }
}

// Convenience functions maintaining the API
impl AgentConfig {
    /// Create a new config builder
    pub fn builder() -> crate::config::builder::AgentConfigBuilder {
        crate::config::builder::AgentConfigBuilder::new()
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_from_file(path)
    }

    /// Load configuration and validate it
    pub fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_with_validation(path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ConfigValidatorImpl::new().validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_config_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let err = AgentConfig::load_with_validation(&path).unwrap_err();
        assert!(matches!(err, ApmError::ConfigNotFound { .. }));

        let err = AgentConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ApmError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_bad_toml_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[error_collector\nenabled = ").unwrap();

        let err = AgentConfig::load_with_validation(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));

        let err = AgentConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ApmError::ConfigParse(_)));
    }

    #[test]
    fn test_validation_runs_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zero.toml");
        fs::write(&path, "[error_collector]\nmax_error_events = 0\n").unwrap();

        assert!(AgentConfig::load_from_file(&path).is_ok());
        assert!(AgentConfig::load_with_validation(&path).is_err());
    }
}
