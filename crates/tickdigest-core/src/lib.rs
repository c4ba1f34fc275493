//! Shared domain types for tickdigest.
//!
//! Holds the news and model collaborator traits, time-window resolution,
//! ticker validation, and environment-driven configuration. Every other
//! crate in the workspace depends on this one; it depends on none of them.

pub mod app_config;
pub mod config;
pub mod error;
pub mod model;
pub mod news;
pub mod period;
pub mod ticker;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, FetchError, ModelError, TickerError};
pub use model::{LanguagePair, LengthBounds, Summarizer, Translator};
pub use news::{NewsRecord, NewsSource};
pub use period::{resolve, DateRange, Period, PeriodParseError};
pub use ticker::Ticker;
