use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DateRange, FetchError, Ticker};

/// One retrieved news article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    /// Article headline. Never empty.
    pub headline: String,
    /// Short body summary supplied by the source. May be empty.
    pub body_summary: String,
    pub url: String,
    /// Publish time, when the source reports one. Not used for ordering.
    pub published_at: Option<DateTime<Utc>>,
    /// Publisher name, when the source reports one.
    pub source: Option<String>,
}

impl NewsRecord {
    /// The text handed to the summarizer for this record: the body summary
    /// when it has content, otherwise the headline.
    #[must_use]
    pub fn summary_input(&self) -> &str {
        let body = self.body_summary.trim();
        if body.is_empty() {
            self.headline.trim()
        } else {
            body
        }
    }
}

/// A remote service that returns news records for a ticker.
///
/// Implementations return records whose publish date falls within `range`
/// (inclusive), in the order the service reports them. An empty `Vec` means
/// "no news" and is distinct from an error. Records should carry a
/// non-blank headline; ones with neither headline nor body are skipped
/// downstream.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch(
        &self,
        ticker: &Ticker,
        range: &DateRange,
    ) -> Result<Vec<NewsRecord>, FetchError>;
}
