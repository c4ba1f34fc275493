//! News digest pipeline for tickdigest.
//!
//! Resolves a period to a date range, fetches news through a
//! [`NewsSource`](tickdigest_core::NewsSource), summarizes it per article or
//! as one chunked body of text, and optionally translates the result.
//! Per-unit model failures are recorded as tagged outcomes and never abort
//! a run; a failed fetch does.

pub mod aggregate;
pub mod chunker;
pub mod error;
pub mod fetch;
pub mod inference;
pub mod pipeline;
pub mod summarize;
pub mod translate;
pub mod types;

mod ordered;

pub use aggregate::aggregate;
pub use chunker::{chunk_text, TextChunk};
pub use error::DigestError;
pub use inference::{HostedSummarizer, HostedTranslator, InferenceClient};
pub use pipeline::Pipeline;
pub use types::{
    ArticleDigest, CombinedDigest, Digest, DigestReport, PipelineConfig, SummaryMode,
    SummaryOutcome, TranslationOutcome, SUMMARY_FAILED_SENTINEL, TRANSLATION_FAILED_SENTINEL,
};
