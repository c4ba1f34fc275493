use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickerError {
    #[error("ticker is empty")]
    Empty,

    #[error("ticker \"{0}\" is longer than 16 characters")]
    TooLong(String),

    #[error("ticker \"{ticker}\" contains invalid character '{ch}'")]
    InvalidCharacter { ticker: String, ch: char },
}

/// Failure reported by a [`NewsSource`](crate::NewsSource).
///
/// Any variant is fatal to a pipeline run: with no records there is nothing
/// to summarize.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network failure, timeout, or a malformed response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The source rejected the request credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The source rejected the ticker.
    #[error("invalid ticker: {0}")]
    InvalidTicker(String),

    #[error("rate limited (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("news source returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

/// Failure reported by a [`Summarizer`](crate::Summarizer) or
/// [`Translator`](crate::Translator) for a single unit of work.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Request(String),

    #[error("model returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The hosted model is still being loaded onto an inference worker.
    #[error("model is loading (estimated {estimated_secs:.0}s)")]
    Loading { estimated_secs: f64 },

    #[error("model returned no output")]
    EmptyOutput,

    #[error("invalid model input: {0}")]
    InvalidInput(String),
}
