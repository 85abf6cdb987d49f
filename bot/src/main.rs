mod config;
mod logging;
mod statsd;

use clap::{Args, Parser, Subcommand};
use config::{Config, ConfigError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about = "Receives Sentry integration webhooks")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Serve the webhook endpoint
    Webhook(ConfigArgs),
    /// Load and validate the config file, then exit
    ValidateConfig(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    #[arg(long, short, default_value = "config.yaml")]
    config: PathBuf,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid sentry DSN: {0}")]
    Dsn(#[from] sentry::types::ParseDsnError),
    #[error(transparent)]
    Metrics(#[from] statsd::MetricsInitError),
    #[error("could not start runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Webhook(#[from] webhook::WebhookError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match &cli.command {
        CliCommand::Webhook(args) => run_webhook(&args.config),
        CliCommand::ValidateConfig(args) => validate_config(&args.config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_webhook(path: &Path) -> Result<(), CliError> {
    let config = Config::from_file(path)?;
    let webhook_config = config.webhook()?.clone();

    let _sentry_guard = logging::init(config.common.logging.as_ref())?;
    if let Some(metrics_config) = &config.common.metrics {
        statsd::init(metrics_config)?;
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    tracing::info!("Starting webhook receiver");
    rt.block_on(async {
        tokio::select! {
            res = webhook::run(webhook_config) => res.map_err(CliError::from),
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl-C, shutting down");
                Ok(())
            }
        }
    })
}

fn validate_config(path: &Path) -> Result<(), CliError> {
    Config::from_file(path)?.webhook()?;
    println!("{} is valid", path.display());
    Ok(())
}
