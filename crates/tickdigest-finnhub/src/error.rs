use thiserror::Error;
use tickdigest_core::FetchError;

/// Errors returned by the Finnhub API client.
#[derive(Debug, Error)]
pub enum FinnhubError {
    /// Network or TLS failure from the underlying HTTP client. The request
    /// URL is stripped before wrapping because it carries the API token.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 from Finnhub.
    #[error("rate limited by Finnhub (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// HTTP 401 or 403: missing, invalid, or under-privileged API key.
    #[error("Finnhub rejected the API key (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("unexpected HTTP status {status} from Finnhub: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// A 2xx response whose body is `{"error": "..."}`.
    #[error("Finnhub API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<FinnhubError> for FetchError {
    fn from(err: FinnhubError) -> Self {
        match err {
            FinnhubError::RateLimited { retry_after_secs } => {
                FetchError::RateLimited { retry_after_secs }
            }
            FinnhubError::Unauthorized { message, .. } => FetchError::Unauthorized(message),
            FinnhubError::UnexpectedStatus {
                status: 400 | 422,
                message,
            } => FetchError::InvalidTicker(message),
            FinnhubError::UnexpectedStatus { status, message } => {
                FetchError::Api { status, message }
            }
            FinnhubError::ApiError(message) => FetchError::Api {
                status: 200,
                message,
            },
            other @ (FinnhubError::Http(_)
            | FinnhubError::Deserialize { .. }
            | FinnhubError::InvalidBaseUrl { .. }) => FetchError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_maps_to_fetch_rate_limited() {
        let err: FetchError = FinnhubError::RateLimited {
            retry_after_secs: 30,
        }
        .into();
        assert_eq!(
            err,
            FetchError::RateLimited {
                retry_after_secs: 30
            }
        );
    }

    #[test]
    fn unprocessable_status_maps_to_invalid_ticker() {
        let err: FetchError = FinnhubError::UnexpectedStatus {
            status: 422,
            message: "Invalid symbol".to_owned(),
        }
        .into();
        assert_eq!(err, FetchError::InvalidTicker("Invalid symbol".to_owned()));
    }

    #[test]
    fn server_error_maps_to_api() {
        let err: FetchError = FinnhubError::UnexpectedStatus {
            status: 502,
            message: "bad gateway".to_owned(),
        }
        .into();
        assert!(matches!(err, FetchError::Api { status: 502, .. }));
    }

    #[test]
    fn deserialize_maps_to_transport() {
        let source = serde_json::from_str::<()>("nope").unwrap_err();
        let err: FetchError = FinnhubError::Deserialize {
            context: "company-news(symbol=AAPL)".to_owned(),
            source,
        }
        .into();
        assert!(matches!(err, FetchError::Transport(ref m) if m.contains("company-news")));
    }
}
