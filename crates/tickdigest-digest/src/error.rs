use thiserror::Error;
use tickdigest_core::FetchError;

#[derive(Debug, Error)]
pub enum DigestError {
    /// The news source failed; nothing downstream ran.
    #[error("could not retrieve news for {ticker}: {source}")]
    FetchFailed {
        ticker: String,
        #[source]
        source: FetchError,
    },

    /// The HTTP client for hosted inference could not be constructed.
    #[error("inference client error: {0}")]
    Client(#[from] reqwest::Error),
}
