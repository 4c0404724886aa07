pub mod builder;
pub mod loader;
pub mod templates;
pub mod types;
pub mod validator;

pub use builder::AgentConfigBuilder;
pub use loader::{ConfigLoader, DefaultConfigLoader};
pub use templates::{ensure_config_file_exists, generate_default_config_template};
pub use types::{
    AgentConfig, AttributeConfig, ClassNaming, ErrorCollectorConfig, InvalidAttributePolicy,
    DEFAULT_CONFIG_FILE,
};
pub use validator::{ConfigValidator, ConfigValidatorImpl};
