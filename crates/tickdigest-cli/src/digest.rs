//! `digest` command handler.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use tickdigest_core::{AppConfig, Period, Ticker};
use tickdigest_digest::{DigestError, InferenceClient, Pipeline, PipelineConfig, SummaryMode};
use tickdigest_finnhub::FinnhubClient;

use crate::render::render_text;

#[derive(Debug)]
pub(crate) struct DigestArgs {
    pub ticker: Ticker,
    pub period: Period,
    pub mode: SummaryMode,
    pub translate: bool,
    pub json: bool,
}

/// Wire the Finnhub source and hosted models into a [`Pipeline`].
///
/// The translator is only built when `translate` is set.
///
/// # Errors
///
/// Returns an error if either HTTP client cannot be constructed.
pub(crate) fn build_pipeline(
    config: &AppConfig,
    mode: SummaryMode,
    translate: bool,
) -> anyhow::Result<Pipeline> {
    let source = FinnhubClient::from_app_config(config)?;
    let inference = InferenceClient::from_app_config(config)?;
    let summarizer = inference.summarizer(&config.summarization_model, config.max_chunk_chars);

    let pipeline = Pipeline::new(
        Arc::new(source),
        Arc::new(summarizer),
        PipelineConfig::from_app_config(config, mode),
    );
    if !translate {
        return Ok(pipeline);
    }

    let translator = inference.translator(&config.translation_model, config.max_chunk_chars);
    Ok(pipeline.with_translator(Arc::new(translator)))
}

/// Run one digest and print it to stdout.
///
/// A failed fetch is printed to stderr and reported through the exit code
/// rather than as an error.
///
/// # Errors
///
/// Returns an error if the pipeline cannot be built or the report cannot be
/// serialized.
pub(crate) async fn run_digest(config: &AppConfig, args: &DigestArgs) -> anyhow::Result<ExitCode> {
    let pipeline = build_pipeline(config, args.mode, args.translate)?;

    let report = match pipeline.run(&args.ticker, args.period, Utc::now()).await {
        Ok(report) => report,
        Err(e @ DigestError::FetchFailed { .. }) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report)?);
    }
    Ok(ExitCode::SUCCESS)
}
