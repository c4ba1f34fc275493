//! Plain-text rendering of a digest report.

use std::fmt::{self, Write as _};

use tickdigest_digest::{Digest, DigestReport};

/// Render `report` for a terminal.
///
/// Failed summaries and translations show their sentinel text.
///
/// # Errors
///
/// Returns [`fmt::Error`] if writing to the buffer fails.
pub(crate) fn render_text(report: &DigestReport) -> Result<String, fmt::Error> {
    let mut out = String::new();

    match &report.digest {
        Digest::NoNews => {
            writeln!(out, "no news found for {}", report.ticker)?;
        }
        Digest::PerArticle { articles } => {
            writeln!(
                out,
                "{} news, last {} ({}): {} article(s)",
                report.ticker, report.period, report.range, report.article_count
            )?;
            for article in articles {
                writeln!(out)?;
                writeln!(out, "## {}", article.headline)?;
                writeln!(out, "{}", article.summary)?;
                if let Some(translation) = &article.translation {
                    writeln!(out, "{translation}")?;
                }
                writeln!(out, "{}", article.url)?;
            }
        }
        Digest::Combined(combined) => {
            writeln!(
                out,
                "{} digest, last {} ({}): {} article(s) in {} chunk(s)",
                report.ticker,
                report.period,
                report.range,
                report.article_count,
                combined.chunks.len()
            )?;
            writeln!(out)?;
            writeln!(out, "{}", combined.text)?;
            if let Some(translation) = &combined.translation {
                writeln!(out)?;
                writeln!(out, "{translation}")?;
            }
        }
    }

    Ok(out)
}
