use crate::error::Result;
use crate::ui::{self, Status};
use apm_errors::AgentConfig;

pub fn execute(config_path: String) -> Result<()> {
    let config = AgentConfig::load_with_validation(&config_path)?;
    let collector = &config.error_collector;
    let attributes = &config.attributes;

    ui::section("Error collector");
    ui::field("enabled", collector.enabled);
    ui::field("high_security", collector.high_security);
    ui::field("max_error_events", collector.max_error_events);
    ui::field("class_naming", &format!("{:?}", collector.class_naming).to_lowercase());
    ui::field("ignore rules", &rule_summary(&collector.ignore_classes, &collector.ignore_messages));
    ui::field(
        "expected rules",
        &rule_summary(&collector.expected_classes, &collector.expected_messages),
    );

    ui::section("Attributes");
    ui::field("max_attributes", attributes.max_attributes);
    ui::field("max_key_bytes", attributes.max_key_bytes);
    ui::field("max_value_bytes", attributes.max_value_bytes);
    ui::field("allow_nested", attributes.allow_nested);
    ui::field("max_nesting_depth", attributes.max_nesting_depth);
    ui::field("on_invalid", &format!("{:?}", attributes.on_invalid).to_lowercase());

    if !collector.enabled {
        ui::status(Status::Warn, "Error collection is disabled; every notice will be refused");
    }

    ui::status(Status::Ok, &format!("{} is valid", config_path));
    Ok(())
}

fn rule_summary(classes: &[String], patterns: &[String]) -> String {
    format!("{} classes, {} message patterns", classes.len(), patterns.len())
}
