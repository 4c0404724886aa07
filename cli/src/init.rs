use crate::error::Result;
use crate::ui::{self, Status};
use apm_errors::config::ensure_config_file_exists;

pub fn execute(config: String, force: bool) -> Result<()> {
    if ensure_config_file_exists(&config, force)? {
        ui::status(Status::Ok, &format!("Wrote default configuration to {}", config));
    } else {
        ui::status(
            Status::Warn,
            &format!(
                "{} already exists; use --force to overwrite it",
                config
            ),
        );
    }
    Ok(())
}
