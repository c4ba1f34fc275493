//! Optional translation stage.
//!
//! Failures follow the same policy as summarization: the affected item gets
//! [`TranslationOutcome::Failed`] and the run continues.

use std::num::NonZeroUsize;

use tickdigest_core::{LanguagePair, Translator};

use crate::chunker::chunk_text;
use crate::ordered::map_ordered;
use crate::types::{SummaryOutcome, TranslationOutcome};

/// Translate `text`, splitting it into chunks the model accepts.
///
/// Translated pieces are space-joined in order. If any piece fails the
/// whole item is reported as failed.
pub async fn translate_text(
    translator: &dyn Translator,
    text: &str,
    languages: &LanguagePair,
) -> TranslationOutcome {
    let mut pieces = Vec::new();
    for chunk in chunk_text(text, translator.max_input_chars()) {
        match translator.translate(chunk.text, languages).await {
            Ok(piece) => pieces.push(piece.trim().to_string()),
            Err(e) => {
                tracing::warn!(
                    chunk = chunk.index,
                    languages = %languages,
                    error = %e,
                    "translation failed"
                );
                return TranslationOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        }
    }
    TranslationOutcome::Translated {
        text: pieces.join(" "),
    }
}

/// Translate every successful summary independently.
///
/// Failed summaries have nothing to translate and map to `None`. Output is
/// aligned with `summaries`.
pub async fn translate_summaries(
    translator: &dyn Translator,
    summaries: &[&SummaryOutcome],
    languages: &LanguagePair,
    concurrency: NonZeroUsize,
) -> Vec<Option<TranslationOutcome>> {
    map_ordered(summaries.to_vec(), concurrency, |summary| async move {
        match summary {
            SummaryOutcome::Summarized { text } => {
                Some(translate_text(translator, text, languages).await)
            }
            SummaryOutcome::Failed { .. } => None,
        }
    })
    .await
}

/// Translate a combined digest chunk by chunk.
///
/// Only summarized chunks reach the translator. Failed chunks keep the
/// summary sentinel in their slot of the joined result. Returns `None` when
/// no chunk was summarized; any failed translation fails the whole digest.
pub async fn translate_chunks(
    translator: &dyn Translator,
    chunks: &[SummaryOutcome],
    languages: &LanguagePair,
    concurrency: NonZeroUsize,
) -> Option<TranslationOutcome> {
    if chunks.iter().all(SummaryOutcome::is_failed) {
        return None;
    }

    let refs: Vec<&SummaryOutcome> = chunks.iter().collect();
    let translated = translate_summaries(translator, &refs, languages, concurrency).await;

    let mut pieces = Vec::with_capacity(chunks.len());
    for (chunk, translation) in chunks.iter().zip(translated) {
        match translation {
            Some(TranslationOutcome::Translated { text }) => pieces.push(text),
            Some(failed @ TranslationOutcome::Failed { .. }) => return Some(failed),
            None => pieces.push(chunk.text().to_string()),
        }
    }
    Some(TranslationOutcome::Translated {
        text: pieces.join(" "),
    })
}
