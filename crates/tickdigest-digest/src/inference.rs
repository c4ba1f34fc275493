//! Hosted inference client for summarization and translation models.
//!
//! Speaks the Hugging Face style `POST /models/{model}` protocol. One
//! [`InferenceClient`] owns the pooled HTTP client; the model handles it
//! hands out are cheap clones that share it.

use std::num::NonZeroUsize;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tickdigest_core::{AppConfig, LanguagePair, LengthBounds, ModelError, Summarizer, Translator};

use crate::error::DigestError;

/// Longest error body, in chars, carried into a [`ModelError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client for a hosted inference endpoint.
#[derive(Clone)]
pub struct InferenceClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: SummarizeParameters,
}

#[derive(Serialize)]
struct SummarizeParameters {
    min_length: u32,
    max_length: u32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct SummaryItem {
    summary_text: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    inputs: &'a str,
    parameters: TranslateParameters<'a>,
}

#[derive(Serialize)]
struct TranslateParameters<'a> {
    src_lang: &'a str,
    tgt_lang: &'a str,
}

#[derive(Deserialize)]
struct TranslationItem {
    translation_text: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    estimated_time: Option<f64>,
}

impl InferenceClient {
    /// Create a client for the endpoint at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Client`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, DigestError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// # Errors
    ///
    /// Same as [`InferenceClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, DigestError> {
        Self::new(
            &config.inference_base_url,
            config.inference_token.clone(),
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// A summarization handle for `model` that accepts at most
    /// `max_input_chars` characters per call.
    #[must_use]
    pub fn summarizer(&self, model: &str, max_input_chars: NonZeroUsize) -> HostedSummarizer {
        HostedSummarizer {
            client: self.clone(),
            model: model.to_string(),
            max_input_chars,
        }
    }

    /// A translation handle for `model`.
    #[must_use]
    pub fn translator(&self, model: &str, max_input_chars: NonZeroUsize) -> HostedTranslator {
        HostedTranslator {
            client: self.clone(),
            model: model.to_string(),
            max_input_chars,
        }
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{model}", self.base_url)
    }

    async fn post<B, R>(&self, model: &str, body: &B) -> Result<R, ModelError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let mut request = self.client.post(self.model_url(model)).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ModelError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &text));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ModelError::Request(format!("response parse error: {}", e.without_url())))
    }
}

/// Map a non-2xx response to a [`ModelError`].
fn status_error(status: u16, body: &str) -> ModelError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();

    if status == 503 {
        if let Some(estimated_secs) = parsed.as_ref().and_then(|b| b.estimated_time) {
            return ModelError::Loading { estimated_secs };
        }
    }

    let message = parsed
        .and_then(|b| b.error)
        .unwrap_or_else(|| body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect());
    ModelError::Status { status, message }
}

/// First non-blank text of a model response, or [`ModelError::EmptyOutput`].
fn first_text(texts: impl IntoIterator<Item = String>) -> Result<String, ModelError> {
    texts
        .into_iter()
        .next()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ModelError::EmptyOutput)
}

/// [`Summarizer`] backed by a hosted summarization model.
#[derive(Debug, Clone)]
pub struct HostedSummarizer {
    client: InferenceClient,
    model: String,
    max_input_chars: NonZeroUsize,
}

#[async_trait]
impl Summarizer for HostedSummarizer {
    fn max_input_chars(&self) -> NonZeroUsize {
        self.max_input_chars
    }

    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, ModelError> {
        let request = SummarizeRequest {
            inputs: text,
            parameters: SummarizeParameters {
                min_length: bounds.min(),
                max_length: bounds.max(),
                do_sample: false,
            },
        };
        tracing::debug!(
            model = %self.model,
            chars = text.chars().count(),
            min_length = bounds.min(),
            max_length = bounds.max(),
            "summarize request"
        );
        let items: Vec<SummaryItem> = self.client.post(&self.model, &request).await?;
        first_text(items.into_iter().map(|i| i.summary_text))
    }
}

/// [`Translator`] backed by a hosted translation model.
#[derive(Debug, Clone)]
pub struct HostedTranslator {
    client: InferenceClient,
    model: String,
    max_input_chars: NonZeroUsize,
}

#[async_trait]
impl Translator for HostedTranslator {
    fn max_input_chars(&self) -> NonZeroUsize {
        self.max_input_chars
    }

    async fn translate(
        &self,
        text: &str,
        languages: &LanguagePair,
    ) -> Result<String, ModelError> {
        let request = TranslateRequest {
            inputs: text,
            parameters: TranslateParameters {
                src_lang: &languages.source,
                tgt_lang: &languages.target,
            },
        };
        tracing::debug!(
            model = %self.model,
            languages = %languages,
            chars = text.chars().count(),
            "translate request"
        );
        let items: Vec<TranslationItem> = self.client.post(&self.model, &request).await?;
        first_text(items.into_iter().map(|i| i.translation_text))
    }
}
