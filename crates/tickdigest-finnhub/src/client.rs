//! HTTP client for the Finnhub REST API.
//!
//! Wraps `reqwest` with Finnhub-specific status mapping, API key handling,
//! and typed response deserialization. Only the `company-news` endpoint is
//! used.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use tickdigest_core::{AppConfig, DateRange, FetchError, NewsRecord, NewsSource, Ticker};

use crate::error::FinnhubError;
use crate::normalize::to_news_record;
use crate::retry::retry_with_backoff;
use crate::types::{CompanyNewsItem, ErrorBody};

const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";
const DEFAULT_USER_AGENT: &str = "tickdigest/0.1 (news-digest)";

/// Fallback wait when a 429 carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Client for the Finnhub REST API.
///
/// Use [`FinnhubClient::new`] for production or
/// [`FinnhubClient::with_base_url`] to point at a mock server in tests.
pub struct FinnhubClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for FinnhubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinnhubClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish_non_exhaustive()
    }
}

impl FinnhubClient {
    /// Creates a new client pointed at the production Finnhub API.
    ///
    /// # Errors
    ///
    /// Returns [`FinnhubError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, FinnhubError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FinnhubError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FinnhubError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, FinnhubError> {
        Self::build(api_key, timeout_secs, base_url, DEFAULT_USER_AGENT)
    }

    /// Creates a client from application config, including retry settings.
    ///
    /// # Errors
    ///
    /// Same as [`FinnhubClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, FinnhubError> {
        Ok(Self::build(
            &config.finnhub_api_key,
            config.request_timeout_secs,
            &config.finnhub_base_url,
            &config.user_agent,
        )?
        .with_retry(config.max_retries, config.retry_backoff_base_ms))
    }

    /// Overrides the retry policy. `max_retries = 0` disables retries.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, retry_backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff_base_ms = retry_backoff_base_ms;
        self
    }

    fn build(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, FinnhubError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Ensure exactly one trailing slash so `Url::join` appends the
        // endpoint instead of replacing the last path segment (`/api/v1`).
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FinnhubError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 2,
            retry_backoff_base_ms: 1_000,
        })
    }

    /// Fetches company news for `ticker` published within `range`.
    ///
    /// Items with a blank headline are skipped; the rest keep the order
    /// Finnhub returned them in.
    ///
    /// # Errors
    ///
    /// - [`FinnhubError::RateLimited`] / [`FinnhubError::Unauthorized`] /
    ///   [`FinnhubError::UnexpectedStatus`] for non-2xx responses.
    /// - [`FinnhubError::ApiError`] if a 2xx body carries an `error` field.
    /// - [`FinnhubError::Http`] on network failure.
    /// - [`FinnhubError::Deserialize`] if the body is not a news array.
    pub async fn company_news(
        &self,
        ticker: &Ticker,
        range: &DateRange,
    ) -> Result<Vec<NewsRecord>, FinnhubError> {
        let from = range.from_iso();
        let to = range.to_iso();
        let url = self.build_url(
            "company-news",
            &[("symbol", ticker.as_str()), ("from", &from), ("to", &to)],
        )?;

        let body = retry_with_backoff(self.max_retries, self.retry_backoff_base_ms, || {
            self.request_json(&url)
        })
        .await?;
        Self::check_api_error(&body)?;

        let items: Vec<CompanyNewsItem> =
            serde_json::from_value(body).map_err(|e| FinnhubError::Deserialize {
                context: format!("company-news(symbol={ticker})"),
                source: e,
            })?;

        let total = items.len();
        let records: Vec<NewsRecord> = items.into_iter().filter_map(to_news_record).collect();
        if records.len() != total {
            tracing::debug!(
                ticker = %ticker,
                dropped = total - records.len(),
                "skipped Finnhub items with blank headlines"
            );
        }
        tracing::info!(
            ticker = %ticker,
            from = %from,
            to = %to,
            count = records.len(),
            "fetched company news"
        );

        Ok(records)
    }

    /// Builds the full request URL with percent-encoded query parameters and
    /// the API token appended last.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, FinnhubError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| FinnhubError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("token", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, maps non-2xx statuses, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, FinnhubError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FinnhubError::Http(e.without_url()))?;
        let response = Self::check_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| FinnhubError::Http(e.without_url()))?;
        serde_json::from_str(&body).map_err(|e| FinnhubError::Deserialize {
            context: url.path().to_owned(),
            source: e,
        })
    }

    async fn check_status(response: Response) -> Result<Response, FinnhubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Err(FinnhubError::RateLimited { retry_after_secs });
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.error)
            .unwrap_or_else(|_| text.trim().to_owned());

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FinnhubError::Unauthorized {
                status: status.as_u16(),
                message,
            });
        }
        Err(FinnhubError::UnexpectedStatus {
            status: status.as_u16(),
            message,
        })
    }

    /// Finnhub occasionally answers 200 with `{"error": "..."}`.
    fn check_api_error(body: &serde_json::Value) -> Result<(), FinnhubError> {
        if let Some(msg) = body.get("error").and_then(serde_json::Value::as_str) {
            return Err(FinnhubError::ApiError(msg.to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl NewsSource for FinnhubClient {
    async fn fetch(
        &self,
        ticker: &Ticker,
        range: &DateRange,
    ) -> Result<Vec<NewsRecord>, FetchError> {
        self.company_news(ticker, range).await.map_err(|e| {
            tracing::warn!(ticker = %ticker, error = %e, "Finnhub company-news failed");
            FetchError::from(e)
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
