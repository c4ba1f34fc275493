use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("FINNHUB_API_KEY", "test-key");
    m
}

#[test]
fn build_app_config_fails_without_finnhub_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "FINNHUB_API_KEY"),
        "expected MissingEnvVar(FINNHUB_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.finnhub_api_key, "test-key");
    assert_eq!(cfg.finnhub_base_url, "https://finnhub.io/api/v1");
    assert_eq!(cfg.inference_base_url, "https://api-inference.huggingface.co");
    assert!(cfg.inference_token.is_none());
    assert_eq!(cfg.summarization_model, "sshleifer/distilbart-cnn-12-6");
    assert_eq!(cfg.translation_model, "Helsinki-NLP/opus-mt-tc-big-en-ko");
    assert_eq!(cfg.languages, LanguagePair::new("en", "ko"));
    assert_eq!(cfg.max_chunk_chars.get(), 512);
    assert_eq!((cfg.article_bounds.min(), cfg.article_bounds.max()), (25, 50));
    assert_eq!(
        (cfg.combined_bounds.min(), cfg.combined_bounds.max()),
        (30, 130)
    );
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_ms, 1000);
    assert_eq!(cfg.concurrency.get(), 1);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.user_agent, "tickdigest/0.1 (news-digest)");
}

#[test]
fn inference_token_prefers_tickdigest_var() {
    let mut map = full_env();
    map.insert("TICKDIGEST_INFERENCE_TOKEN", "primary");
    map.insert("HF_API_TOKEN", "fallback");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.inference_token.as_deref(), Some("primary"));
}

#[test]
fn inference_token_falls_back_to_hf_var() {
    let mut map = full_env();
    map.insert("HF_API_TOKEN", "fallback");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.inference_token.as_deref(), Some("fallback"));
}

#[test]
fn blank_inference_token_is_none() {
    let mut map = full_env();
    map.insert("TICKDIGEST_INFERENCE_TOKEN", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.inference_token.is_none());
}

#[test]
fn language_override() {
    let mut map = full_env();
    map.insert("TICKDIGEST_SOURCE_LANG", "en");
    map.insert("TICKDIGEST_TARGET_LANG", "ja");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.languages.target, "ja");
}

#[test]
fn max_chunk_chars_override() {
    let mut map = full_env();
    map.insert("TICKDIGEST_MAX_CHUNK_CHARS", "1024");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_chunk_chars.get(), 1024);
}

#[test]
fn max_chunk_chars_zero_is_invalid() {
    let mut map = full_env();
    map.insert("TICKDIGEST_MAX_CHUNK_CHARS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TICKDIGEST_MAX_CHUNK_CHARS"),
        "expected InvalidEnvVar(TICKDIGEST_MAX_CHUNK_CHARS), got: {result:?}"
    );
}

#[test]
fn concurrency_zero_is_invalid() {
    let mut map = full_env();
    map.insert("TICKDIGEST_CONCURRENCY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TICKDIGEST_CONCURRENCY"),
        "expected InvalidEnvVar(TICKDIGEST_CONCURRENCY), got: {result:?}"
    );
}

#[test]
fn article_bounds_override() {
    let mut map = full_env();
    map.insert("TICKDIGEST_ARTICLE_MIN_LENGTH", "10");
    map.insert("TICKDIGEST_ARTICLE_MAX_LENGTH", "80");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!((cfg.article_bounds.min(), cfg.article_bounds.max()), (10, 80));
}

#[test]
fn inverted_article_bounds_are_invalid() {
    let mut map = full_env();
    map.insert("TICKDIGEST_ARTICLE_MIN_LENGTH", "90");
    map.insert("TICKDIGEST_ARTICLE_MAX_LENGTH", "80");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TICKDIGEST_ARTICLE_MAX_LENGTH"),
        "expected InvalidEnvVar(TICKDIGEST_ARTICLE_MAX_LENGTH), got: {result:?}"
    );
}

#[test]
fn combined_min_length_invalid() {
    let mut map = full_env();
    map.insert("TICKDIGEST_COMBINED_MIN_LENGTH", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TICKDIGEST_COMBINED_MIN_LENGTH"),
        "expected InvalidEnvVar(TICKDIGEST_COMBINED_MIN_LENGTH), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("TICKDIGEST_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TICKDIGEST_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TICKDIGEST_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_retries_override() {
    let mut map = full_env();
    map.insert("TICKDIGEST_MAX_RETRIES", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_retries, 0);
}

#[test]
fn debug_redacts_secrets() {
    let mut map = full_env();
    map.insert("TICKDIGEST_INFERENCE_TOKEN", "hf_secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-key"), "api key leaked: {rendered}");
    assert!(!rendered.contains("hf_secret"), "token leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}
