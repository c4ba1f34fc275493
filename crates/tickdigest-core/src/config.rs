use std::num::NonZeroUsize;

use crate::app_config::AppConfig;
use crate::{ConfigError, LanguagePair, LengthBounds};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_non_zero = |var: &str, default: &str| -> Result<NonZeroUsize, ConfigError> {
        or_default(var, default)
            .parse::<NonZeroUsize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bounds = |min_var: &str,
                        min_default: &str,
                        max_var: &str,
                        max_default: &str|
     -> Result<LengthBounds, ConfigError> {
        let min = parse_u32(min_var, min_default)?;
        let max = parse_u32(max_var, max_default)?;
        LengthBounds::new(min, max).map_err(|e| invalid(max_var, e.to_string()))
    };

    let finnhub_api_key = require("FINNHUB_API_KEY")?;
    let finnhub_base_url = or_default("TICKDIGEST_FINNHUB_BASE_URL", "https://finnhub.io/api/v1");

    let inference_base_url = or_default(
        "TICKDIGEST_INFERENCE_BASE_URL",
        "https://api-inference.huggingface.co",
    );
    let inference_token = lookup("TICKDIGEST_INFERENCE_TOKEN")
        .or_else(|_| lookup("HF_API_TOKEN"))
        .ok()
        .filter(|t| !t.trim().is_empty());
    let summarization_model = or_default(
        "TICKDIGEST_SUMMARIZATION_MODEL",
        "sshleifer/distilbart-cnn-12-6",
    );
    let translation_model = or_default(
        "TICKDIGEST_TRANSLATION_MODEL",
        "Helsinki-NLP/opus-mt-tc-big-en-ko",
    );
    let languages = LanguagePair::new(
        or_default("TICKDIGEST_SOURCE_LANG", "en"),
        or_default("TICKDIGEST_TARGET_LANG", "ko"),
    );

    let max_chunk_chars = parse_non_zero("TICKDIGEST_MAX_CHUNK_CHARS", "512")?;
    let article_bounds = parse_bounds(
        "TICKDIGEST_ARTICLE_MIN_LENGTH",
        "25",
        "TICKDIGEST_ARTICLE_MAX_LENGTH",
        "50",
    )?;
    let combined_bounds = parse_bounds(
        "TICKDIGEST_COMBINED_MIN_LENGTH",
        "30",
        "TICKDIGEST_COMBINED_MAX_LENGTH",
        "130",
    )?;

    let request_timeout_secs = parse_u64("TICKDIGEST_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("TICKDIGEST_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("TICKDIGEST_RETRY_BACKOFF_BASE_MS", "1000")?;
    let concurrency = parse_non_zero("TICKDIGEST_CONCURRENCY", "1")?;

    let log_level = or_default("TICKDIGEST_LOG_LEVEL", "info");
    let user_agent = or_default("TICKDIGEST_USER_AGENT", "tickdigest/0.1 (news-digest)");

    Ok(AppConfig {
        finnhub_api_key,
        finnhub_base_url,
        inference_base_url,
        inference_token,
        summarization_model,
        translation_model,
        languages,
        max_chunk_chars,
        article_bounds,
        combined_bounds,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        concurrency,
        log_level,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
