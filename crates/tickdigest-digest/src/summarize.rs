//! Summarization stage: per-article and combined strategies.
//!
//! A model failure on one unit is recorded as [`SummaryOutcome::Failed`] for
//! that unit only. Nothing in this module returns an error.

use std::num::NonZeroUsize;

use tickdigest_core::{LengthBounds, ModelError, NewsRecord, Summarizer};

use crate::chunker::{chunk_text, truncate_chars};
use crate::ordered::map_ordered;
use crate::types::SummaryOutcome;

/// Summarize one unit of text, folding any model failure into the outcome.
async fn summarize_unit(
    summarizer: &dyn Summarizer,
    index: usize,
    text: &str,
    bounds: LengthBounds,
) -> SummaryOutcome {
    if text.trim().is_empty() {
        tracing::warn!(index, "skipping unit with no text");
        return SummaryOutcome::Failed {
            reason: ModelError::InvalidInput("no text to summarize".to_string()).to_string(),
        };
    }

    match summarizer.summarize(text, bounds).await {
        Ok(summary) if !summary.trim().is_empty() => SummaryOutcome::Summarized {
            text: summary.trim().to_string(),
        },
        Ok(_) => {
            tracing::warn!(index, "summarizer returned blank text");
            SummaryOutcome::Failed {
                reason: ModelError::EmptyOutput.to_string(),
            }
        }
        Err(e) => {
            tracing::warn!(index, error = %e, "summarization failed");
            SummaryOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Summarize each record independently.
///
/// The input for a record is its body summary, or its headline when the
/// body is empty. Inputs longer than the model accepts are truncated to its
/// limit. A record with no text at all gets a failed outcome without a
/// model call. Bounds are scaled to the input so short texts are not asked for a
/// longer summary than they contain. Returns one outcome per record, in
/// record order.
pub async fn summarize_articles(
    summarizer: &dyn Summarizer,
    records: &[NewsRecord],
    cap: LengthBounds,
    concurrency: NonZeroUsize,
) -> Vec<SummaryOutcome> {
    let limit = summarizer.max_input_chars();
    let units: Vec<(usize, &str)> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let input = record.summary_input();
            let clipped = truncate_chars(input, limit);
            if clipped.len() < input.len() {
                tracing::debug!(index, limit = limit.get(), "truncated article input");
            }
            (index, clipped)
        })
        .collect();

    map_ordered(units, concurrency, |(index, text)| {
        summarize_unit(summarizer, index, text, LengthBounds::scaled_to(text, cap))
    })
    .await
}

/// The per-record summary inputs, space-joined in record order.
///
/// Records with no text at all are left out.
#[must_use]
pub fn combined_text(records: &[NewsRecord]) -> String {
    records
        .iter()
        .map(NewsRecord::summary_input)
        .filter(|input| !input.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Summarize all records as one body of text.
///
/// The joined text is cut into chunks of at most the model's input limit
/// and each chunk is summarized with the same fixed `bounds`. Returns one
/// outcome per chunk, in chunk order.
pub async fn summarize_combined(
    summarizer: &dyn Summarizer,
    records: &[NewsRecord],
    bounds: LengthBounds,
    concurrency: NonZeroUsize,
) -> Vec<SummaryOutcome> {
    let text = combined_text(records);
    let chunks = chunk_text(&text, summarizer.max_input_chars());
    tracing::debug!(
        chars = text.chars().count(),
        chunks = chunks.len(),
        "chunked combined text"
    );

    map_ordered(chunks, concurrency, |chunk| {
        summarize_unit(summarizer, chunk.index, chunk.text, bounds)
    })
    .await
}
