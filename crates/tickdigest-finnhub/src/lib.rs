//! Finnhub `company-news` client.
//!
//! Implements [`tickdigest_core::NewsSource`] on top of the Finnhub REST API,
//! with bounded retry on transient failures.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

mod retry;

pub use client::FinnhubClient;
pub use error::FinnhubError;
pub use normalize::to_news_record;
pub use types::CompanyNewsItem;
