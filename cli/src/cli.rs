use apm_errors::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "apm-errors")]
#[command(
    author,
    version,
    about = "Inspect how errors are classified and recorded by the APM error collector"
)]
pub struct Cli {
    /// Enable verbose output with debug logging
    #[clap(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Configuration file path
        #[clap(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: String,

        /// Overwrite an existing file
        #[clap(long, default_value_t = false)]
        force: bool,
    },

    /// Load and validate a configuration file
    CheckConfig {
        /// Configuration file path
        #[clap(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: String,
    },

    /// Notice an error and print the harvested events as JSON
    Notice {
        /// Configuration file path (built-in defaults when omitted)
        #[clap(short, long)]
        config: Option<String>,

        /// Error message
        #[clap(short, long)]
        message: Option<String>,

        /// Aggregation class (derived from the type name when omitted)
        #[clap(long)]
        class: Option<String>,

        /// Extra attribute as KEY=VALUE; may be repeated
        #[clap(short, long = "attr")]
        attrs: Vec<String>,

        /// JSON file holding a StandardError ({"message", "class", "attributes"})
        #[clap(short, long)]
        input: Option<String>,

        /// Attach the stack trace captured at notice time
        #[clap(long, default_value_t = false)]
        stack: bool,

        /// Pretty-print the JSON output
        #[clap(short, long, default_value_t = false)]
        pretty: bool,
    },
}
