//! Digest pipeline orchestration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tickdigest_core::{resolve, NewsRecord, NewsSource, Period, Summarizer, Ticker, Translator};

use crate::aggregate::aggregate;
use crate::error::DigestError;
use crate::fetch::fetch_news;
use crate::summarize::{summarize_articles, summarize_combined};
use crate::translate::{translate_chunks, translate_summaries};
use crate::types::{ArticleDigest, CombinedDigest, Digest, DigestReport, PipelineConfig, SummaryMode};

/// One news source and its models, wired together for repeated runs.
///
/// Collaborators are shared read-only, so a `Pipeline` can serve any number
/// of runs, concurrently or not.
#[derive(Clone)]
pub struct Pipeline {
    source: Arc<dyn NewsSource>,
    summarizer: Arc<dyn Summarizer>,
    translator: Option<Arc<dyn Translator>>,
    config: PipelineConfig,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("translate", &self.translator.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// A pipeline that summarizes without translating.
    #[must_use]
    pub fn new(
        source: Arc<dyn NewsSource>,
        summarizer: Arc<dyn Summarizer>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            summarizer,
            translator: None,
            config,
        }
    }

    /// Enable the translation stage.
    #[must_use]
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Run the full pipeline for `ticker` over `period`, ending at `now`.
    ///
    /// 1. Resolve `period` to a date range ending on `now`'s date.
    /// 2. Fetch news. A failure here aborts the run.
    /// 3. With zero records, return [`Digest::NoNews`] without touching a model.
    /// 4. Summarize per article or combined, per the configured mode.
    /// 5. Translate the summaries when a translator is set.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::FetchFailed`] if the news source fails. Model
    /// failures never surface here; they are recorded in the digest.
    pub async fn run(
        &self,
        ticker: &Ticker,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<DigestReport, DigestError> {
        let range = resolve(period, now);
        tracing::info!(
            ticker = %ticker,
            period = %period,
            range = %range,
            mode = %self.config.mode,
            "starting digest run"
        );

        let records = fetch_news(self.source.as_ref(), ticker, &range).await?;
        let article_count = records.len();

        let digest = if records.is_empty() {
            tracing::info!(ticker = %ticker, "no news in range, skipping summarization");
            Digest::NoNews
        } else {
            match self.config.mode {
                SummaryMode::PerArticle => self.per_article(records).await,
                SummaryMode::Combined => self.combined(&records).await,
            }
        };

        tracing::info!(ticker = %ticker, articles = article_count, "digest run complete");
        Ok(DigestReport {
            ticker: ticker.clone(),
            period,
            range,
            article_count,
            digest,
        })
    }

    async fn per_article(&self, records: Vec<NewsRecord>) -> Digest {
        let summaries = summarize_articles(
            self.summarizer.as_ref(),
            &records,
            self.config.article_bounds,
            self.config.concurrency,
        )
        .await;

        let translations = match &self.translator {
            Some(translator) => {
                let refs: Vec<_> = summaries.iter().collect();
                translate_summaries(
                    translator.as_ref(),
                    &refs,
                    &self.config.languages,
                    self.config.concurrency,
                )
                .await
            }
            None => vec![None; summaries.len()],
        };

        let articles = records
            .into_iter()
            .zip(summaries)
            .zip(translations)
            .map(|((record, summary), translation)| ArticleDigest {
                headline: record.headline,
                summary,
                url: record.url,
                translation,
            })
            .collect();
        Digest::PerArticle { articles }
    }

    async fn combined(&self, records: &[NewsRecord]) -> Digest {
        let chunks = summarize_combined(
            self.summarizer.as_ref(),
            records,
            self.config.combined_bounds,
            self.config.concurrency,
        )
        .await;
        let text = aggregate(&chunks);

        let failed = chunks.iter().filter(|c| c.is_failed()).count();
        if failed > 0 {
            tracing::warn!(failed, total = chunks.len(), "some chunks failed to summarize");
        }

        let translation = match &self.translator {
            Some(translator) => {
                translate_chunks(
                    translator.as_ref(),
                    &chunks,
                    &self.config.languages,
                    self.config.concurrency,
                )
                .await
            }
            None => None,
        };

        Digest::Combined(CombinedDigest {
            chunks,
            text,
            translation,
        })
    }
}
