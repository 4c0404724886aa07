use std::path::PathBuf;
use std::result;
use thiserror::Error;

/// Result type alias for apm-errors operations
pub type Result<T> = result::Result<T, ApmError>;

/// Failures of the collector and its configuration layer.
///
/// Errors that are *reported* through the collector never end up here; only
/// the reasons a report could not be taken, or a config could not be loaded.
#[derive(Debug, Error)]
pub enum ApmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("error collection is disabled")]
    Disabled,

    #[error("high security enabled: error attributes are not permitted")]
    HighSecurityEnabled,

    #[error("invalid attribute '{key}': {reason}")]
    InvalidAttribute { key: String, reason: String },

    #[error("{0}: {1}")]
    WithContext(String, Box<ApmError>),
}

impl ApmError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new invalid attribute error
    pub fn invalid_attribute<K: Into<String>, R: Into<String>>(key: K, reason: R) -> Self {
        Self::InvalidAttribute {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Add context to an error
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    /// Get a user-friendly message for command line display
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigNotFound { path } => format!(
                "Configuration file not found at {}. Run `apm-errors init` to create one.",
                path.display()
            ),
            Self::ConfigParse(err) => format!("Configuration is not valid TOML: {err}"),
            Self::Regex(err) => format!("Invalid regular expression: {err}"),
            Self::Disabled => {
                "Error collection is disabled (error_collector.enabled = false)".to_string()
            }
            Self::HighSecurityEnabled => {
                "Error attributes are not allowed while high_security is enabled".to_string()
            }
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
            _ => format!("{self}"),
        }
    }
}

// Helper trait for adding context to results
pub trait ResultExt<T, E> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for result::Result<T, E>
where
    E: Into<ApmError>,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let apm_err: ApmError = err.into();
            apm_err.with_context(context())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_nests_user_message() {
        let err = ApmError::Disabled.with_context("noticing error");
        assert_eq!(
            err.user_message(),
            "noticing error: Error collection is disabled (error_collector.enabled = false)"
        );
    }

    #[test]
    fn test_result_ext_wraps_foreign_error() {
        let res: result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        let err = res.with_context(|| "reading config").unwrap_err();
        assert!(err.to_string().starts_with("reading config: IO error"));
    }

    #[test]
    fn test_invalid_attribute_display() {
        let err = ApmError::invalid_attribute("k", "too long");
        assert_eq!(err.to_string(), "invalid attribute 'k': too long");
    }
}
