mod check_config;
mod cli;
mod error;
mod init;
mod notice;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use notice::NoticeArgs;
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init { config, force } => init::execute(config, force),
        Commands::CheckConfig { config } => check_config::execute(config),
        Commands::Notice {
            config,
            message,
            class,
            attrs,
            input,
            stack,
            pretty,
        } => notice::execute(NoticeArgs {
            config,
            message,
            class,
            attrs,
            input,
            stack,
            pretty,
            verbose: cli.verbose,
        }),
    };

    if let Err(err) = result {
        ui::status(ui::Status::Error, &err.user_message());
        process::exit(1);
    }
}
