//! News retrieval step.

use tickdigest_core::{DateRange, NewsRecord, NewsSource, Ticker};

use crate::error::DigestError;

/// Fetch news for `ticker` within `range`.
///
/// Records come back in source order. An empty `Vec` is "no news", not an
/// error.
///
/// # Errors
///
/// Returns [`DigestError::FetchFailed`] for any source failure.
pub async fn fetch_news(
    source: &dyn NewsSource,
    ticker: &Ticker,
    range: &DateRange,
) -> Result<Vec<NewsRecord>, DigestError> {
    match source.fetch(ticker, range).await {
        Ok(records) => {
            tracing::info!(
                ticker = %ticker,
                range = %range,
                count = records.len(),
                "fetched news"
            );
            Ok(records)
        }
        Err(e) => {
            tracing::error!(ticker = %ticker, range = %range, error = %e, "news fetch failed");
            Err(DigestError::FetchFailed {
                ticker: ticker.to_string(),
                source: e,
            })
        }
    }
}
