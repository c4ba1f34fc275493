use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::Serialize;
use tickdigest_core::{AppConfig, DateRange, LanguagePair, LengthBounds, Period, Ticker};

/// Text shown in place of a summary the model failed to produce.
pub const SUMMARY_FAILED_SENTINEL: &str = "summary generation failed";

/// Text shown in place of a translation the model failed to produce.
pub const TRANSLATION_FAILED_SENTINEL: &str = "translation failed";

/// Outcome of summarizing one article or one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryOutcome {
    Summarized { text: String },
    Failed { reason: String },
}

impl SummaryOutcome {
    /// Presentation text: the summary, or [`SUMMARY_FAILED_SENTINEL`].
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            SummaryOutcome::Summarized { text } => text,
            SummaryOutcome::Failed { .. } => SUMMARY_FAILED_SENTINEL,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, SummaryOutcome::Failed { .. })
    }
}

impl fmt::Display for SummaryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Outcome of translating one summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TranslationOutcome {
    Translated { text: String },
    Failed { reason: String },
}

impl TranslationOutcome {
    /// Presentation text: the translation, or [`TRANSLATION_FAILED_SENTINEL`].
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            TranslationOutcome::Translated { text } => text,
            TranslationOutcome::Failed { .. } => TRANSLATION_FAILED_SENTINEL,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, TranslationOutcome::Failed { .. })
    }
}

impl fmt::Display for TranslationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// One article's entry in a per-article digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleDigest {
    pub headline: String,
    pub summary: SummaryOutcome,
    pub url: String,
    /// `None` when translation is disabled or the summary itself failed.
    pub translation: Option<TranslationOutcome>,
}

/// Result of combined mode: per-chunk outcomes plus their aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedDigest {
    pub chunks: Vec<SummaryOutcome>,
    /// Chunk texts joined with single spaces, in chunk order.
    pub text: String,
    pub translation: Option<TranslationOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Digest {
    /// The source returned zero records; no model was invoked.
    NoNews,
    PerArticle { articles: Vec<ArticleDigest> },
    Combined(CombinedDigest),
}

/// Everything a presentation layer needs to render one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestReport {
    pub ticker: Ticker,
    pub period: Period,
    pub range: DateRange,
    /// Number of records the source returned.
    pub article_count: usize,
    pub digest: Digest,
}

/// How fetched records are summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryMode {
    /// One summary per article.
    #[default]
    PerArticle,
    /// All article texts joined, chunked, summarized, and aggregated.
    Combined,
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryMode::PerArticle => write!(f, "per-article"),
            SummaryMode::Combined => write!(f, "combined"),
        }
    }
}

impl FromStr for SummaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-article" | "article" | "articles" => Ok(SummaryMode::PerArticle),
            "combined" | "digest" => Ok(SummaryMode::Combined),
            other => Err(format!(
                "unknown mode \"{other}\" (expected per-article or combined)"
            )),
        }
    }
}

/// Configuration for one pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub mode: SummaryMode,
    /// Upper bounds for per-article summaries; scaled down for short inputs.
    pub article_bounds: LengthBounds,
    /// Fixed bounds for each chunk in combined mode.
    pub combined_bounds: LengthBounds,
    pub languages: LanguagePair,
    /// Maximum model calls in flight at once. `1` runs strictly in order.
    pub concurrency: NonZeroUsize,
}

impl PipelineConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig, mode: SummaryMode) -> Self {
        Self {
            mode,
            article_bounds: config.article_bounds,
            combined_bounds: config.combined_bounds,
            languages: config.languages.clone(),
            concurrency: config.concurrency,
        }
    }
}
