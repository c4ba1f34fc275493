//! Finnhub API response types.

use serde::Deserialize;

/// One entry of the `company-news` response array.
///
/// Finnhub omits or blanks fields freely, so everything defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanyNewsItem {
    pub category: String,
    /// Publish time as UNIX seconds.
    pub datetime: i64,
    pub headline: String,
    pub id: i64,
    pub image: String,
    /// Ticker the item was matched to.
    pub related: String,
    pub source: String,
    pub summary: String,
    pub url: String,
}

/// Body of an error response, e.g. `{"error": "Invalid API key."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
