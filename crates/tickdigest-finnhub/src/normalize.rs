//! Normalization of Finnhub items into [`NewsRecord`]s.

use chrono::DateTime;
use tickdigest_core::NewsRecord;

use crate::types::CompanyNewsItem;

/// Converts a Finnhub item into a [`NewsRecord`].
///
/// Returns `None` when the headline is blank, since every record must carry
/// one. A non-positive `datetime` becomes `published_at: None`.
#[must_use]
pub fn to_news_record(item: CompanyNewsItem) -> Option<NewsRecord> {
    let headline = item.headline.trim();
    if headline.is_empty() {
        return None;
    }

    let published_at = if item.datetime > 0 {
        DateTime::from_timestamp(item.datetime, 0)
    } else {
        None
    };
    let source = Some(item.source.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    Some(NewsRecord {
        headline: headline.to_owned(),
        body_summary: item.summary.trim().to_owned(),
        url: item.url,
        published_at,
        source,
    })
}
