//! Folding chunk-level summaries into one digest text.

use crate::types::SummaryOutcome;

/// Join chunk summaries with single spaces, in chunk order.
///
/// Failed chunks contribute the failure sentinel, so nothing is dropped.
#[must_use]
pub fn aggregate(outcomes: &[SummaryOutcome]) -> String {
    outcomes
        .iter()
        .map(SummaryOutcome::text)
        .collect::<Vec<_>>()
        .join(" ")
}
