mod digest;
mod render;

use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tickdigest_core::{resolve, Period, Ticker};
use tickdigest_digest::SummaryMode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tickdigest")]
#[command(about = "Summarize recent news for a stock ticker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch recent news for a ticker and summarize it
    Digest {
        /// Ticker symbol, e.g. AAPL
        ticker: Ticker,

        /// How far back to look: day, week, or month (28 days)
        #[arg(long, default_value = "week")]
        period: Period,

        /// per-article: one summary per article; combined: one digest for all
        #[arg(long, default_value = "per-article")]
        mode: SummaryMode,

        /// Translate summaries into the configured target language
        #[arg(long)]
        translate: bool,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the date range a period resolves to today
    Window {
        #[arg(long, default_value = "week")]
        period: Period,
    },
}

/// Install the stderr subscriber. `RUST_LOG` wins over `default_level`.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Digest {
            ticker,
            period,
            mode,
            translate,
            json,
        } => {
            let config = tickdigest_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            tracing::debug!(?config, "loaded config");
            digest::run_digest(
                &config,
                &digest::DigestArgs {
                    ticker,
                    period,
                    mode,
                    translate,
                    json,
                },
            )
            .await
        }
        Commands::Window { period } => {
            init_tracing("warn")?;
            println!("{}", resolve(period, Utc::now()));
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests;
