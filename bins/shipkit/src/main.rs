//! shipkit: pick shipping rates and check webhook signatures from the shell.

mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use commands::webhook::SignatureSource;
use config::Config;
use output::Status;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "shipkit")]
#[command(about = "Shipping rate selection and webhook verification")]
#[command(version)]
struct Cli {
    /// Path to a shipkit.toml configuration file
    #[arg(long, global = true, env = "SHIPKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the cheapest rate that arrives in time
    LowestRate {
        /// JSON file with an array of rates, or an object with a "rates" array
        rates: PathBuf,

        /// Maximum acceptable transit days
        #[arg(short = 'd', long)]
        max_days: Option<String>,

        /// Delivery accuracy key, e.g. percentile_90
        #[arg(short, long)]
        accuracy: Option<String>,
    },

    /// Verify a webhook body against its HMAC signature
    VerifyWebhook {
        /// File holding the raw request body
        body: PathBuf,

        /// Value of the X-Hmac-Signature header
        #[arg(short, long, conflicts_with = "headers")]
        signature: Option<String>,

        /// JSON file holding the request headers
        #[arg(long)]
        headers: Option<PathBuf>,

        /// Webhook secret (defaults to the configured environment variable)
        #[arg(long)]
        secret: Option<String>,
    },

    /// Print the X-Hmac-Signature value for a body
    SignWebhook {
        /// File holding the raw request body
        body: PathBuf,

        /// Webhook secret (defaults to the configured environment variable)
        #[arg(long)]
        secret: Option<String>,
    },

    /// List accepted delivery accuracy keys
    Accuracies,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    shipkit_telemetry::init_with_config(config.telemetry(cli.verbose))?;

    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    match cli.command {
        Commands::LowestRate { rates, max_days, accuracy } => commands::rates::lowest_rate(
            &rates,
            max_days.as_deref(),
            accuracy.as_deref(),
            &config,
            cli.json,
        ),

        Commands::VerifyWebhook { body, signature, headers, secret } => {
            let source = match (&signature, &headers) {
                (Some(signature), _) => SignatureSource::Value(signature),
                (None, Some(path)) => SignatureSource::HeadersFile(path),
                (None, None) => SignatureSource::None,
            };
            commands::webhook::verify(&body, source, secret.as_deref(), &config, cli.json)
        }

        Commands::SignWebhook { body, secret } => {
            commands::webhook::sign(&body, secret.as_deref(), &config, cli.json)
        }

        Commands::Accuracies => commands::rates::accuracies(cli.json),
    }
}
