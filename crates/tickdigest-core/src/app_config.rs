use std::num::NonZeroUsize;

use crate::{LanguagePair, LengthBounds};

#[derive(Clone)]
pub struct AppConfig {
    pub finnhub_api_key: String,
    pub finnhub_base_url: String,
    pub inference_base_url: String,
    pub inference_token: Option<String>,
    pub summarization_model: String,
    pub translation_model: String,
    pub languages: LanguagePair,
    pub max_chunk_chars: NonZeroUsize,
    pub article_bounds: LengthBounds,
    pub combined_bounds: LengthBounds,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub concurrency: NonZeroUsize,
    pub log_level: String,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("finnhub_api_key", &"[redacted]")
            .field("finnhub_base_url", &self.finnhub_base_url)
            .field("inference_base_url", &self.inference_base_url)
            .field(
                "inference_token",
                &self.inference_token.as_ref().map(|_| "[redacted]"),
            )
            .field("summarization_model", &self.summarization_model)
            .field("translation_model", &self.translation_model)
            .field("languages", &self.languages)
            .field("max_chunk_chars", &self.max_chunk_chars)
            .field("article_bounds", &self.article_bounds)
            .field("combined_bounds", &self.combined_bounds)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("concurrency", &self.concurrency)
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
