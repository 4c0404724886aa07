use crate::error::{CliError, Result, ResultExt};
use crate::ui::{self, Status};
use apm_errors::{
    AgentConfig, AttributeValue, ErrorCollector, NoticeOutcome, StandardError, Traced,
};
use std::fs;

#[derive(Debug, Clone)]
pub struct NoticeArgs {
    pub config: Option<String>,
    pub message: Option<String>,
    pub class: Option<String>,
    pub attrs: Vec<String>,
    pub input: Option<String>,
    pub stack: bool,
    pub pretty: bool,
    pub verbose: bool,
}

pub fn execute(args: NoticeArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => AgentConfig::load_with_validation(path)?,
        None => AgentConfig::default(),
    };
    let collector = ErrorCollector::new(config)?;

    let err = build_error(&args)?;
    let outcome = if args.stack {
        collector.notice_error(&Traced::new(err))?
    } else {
        collector.notice_error(&err)?
    };

    let (status, message) = outcome_status(outcome);
    ui::status(status, message);

    let harvest = collector.harvest();

    if args.verbose {
        for event in &harvest.events {
            if event.stack_trace.is_empty() {
                continue;
            }
            ui::section(&format!("Stack trace for {}", event.class));
            for frame in event.stack_trace.resolve() {
                eprintln!("  {}", frame);
            }
        }
    }

    println!("{}", harvest.to_json(args.pretty)?);
    Ok(())
}

fn outcome_status(outcome: NoticeOutcome) -> (Status, &'static str) {
    match outcome {
        NoticeOutcome::Recorded => (Status::Info, "Error recorded"),
        NoticeOutcome::Ignored => (Status::Warn, "Error matched an ignore rule"),
        NoticeOutcome::Dropped => (Status::Warn, "Error buffer full, event dropped"),
    }
}

fn build_error(args: &NoticeArgs) -> Result<StandardError> {
    let mut err = match &args.input {
        Some(path) => {
            let content = fs::read_to_string(path).with_context(|| format!("Reading {}", path))?;
            serde_json::from_str::<StandardError>(&content)
                .with_context(|| format!("Parsing {}", path))?
        }
        None => {
            if args.message.is_none() {
                return Err(CliError::Other(
                    "Either --message or --input is required".to_string(),
                ));
            }
            StandardError::default()
        }
    };

    if let Some(message) = &args.message {
        err.message = message.clone();
    }
    if let Some(class) = &args.class {
        err.class = class.clone();
    }
    for raw in &args.attrs {
        let (key, value) = parse_attribute_arg(raw)?;
        err.attributes.insert(key, value);
    }

    Ok(err)
}

fn parse_attribute_arg(raw: &str) -> Result<(String, AttributeValue)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidAttributeArg(raw.to_string()))?;
    Ok((key.to_string(), AttributeValue::parse_loose(value)))
}
