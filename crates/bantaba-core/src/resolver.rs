use std::sync::Arc;

use bantaba_dictionary::{MatchTier, WordLists};
use bantaba_remote::RemoteMirror;
use bantaba_types::{GeneratedBy, LanguageCode, Translation, TranslationStatus};
use chrono::Utc;
use uuid::Uuid;

use crate::error::ResolveError;

/// `[WO] cat`
pub fn placeholder(target: LanguageCode, word: &str) -> String {
    format!("[{}] {}", target.as_str().to_uppercase(), word)
}

/// Used when a matched entry has no word for the target language
pub fn missing_translation(target: LanguageCode) -> String {
    format!("[No {target} translation]")
}

/// Produces a candidate translation: remote lookup first, then the local
/// word list, then a placeholder.
pub struct TranslationResolver {
    word_lists: Arc<WordLists>,
    mirror: Arc<RemoteMirror>,
}

impl TranslationResolver {
    pub fn new(word_lists: Arc<WordLists>, mirror: Arc<RemoteMirror>) -> Self {
        Self { word_lists, mirror }
    }

    pub async fn resolve(
        &self,
        word: &str,
        source: LanguageCode,
        target: LanguageCode,
        category: Option<&str>,
    ) -> Result<Translation, ResolveError> {
        tracing::debug!("Looking up translation for {word:?} from {source} to {target}");

        if let Some(translation) = self.resolve_remote(word, source, target).await {
            tracing::info!("Remote translation for {word:?}: {}", translation.target_word);
            return Ok(translation);
        }

        let target_word = self.resolve_local(word, target)?;
        tracing::info!("Local translation for {word:?}: {target_word}");

        Ok(Translation {
            id: Uuid::new_v4().to_string(),
            source_word: word.to_string(),
            target_word,
            source_language: source,
            target_language: target,
            status: TranslationStatus::Pending,
            generated_by: GeneratedBy::Api,
            created_at: Utc::now(),
            verified_at: None,
            category: category.map(str::to_string),
            difficulty: None,
            remote_id: None,
        })
    }

    /// Resolve each word in order, stopping at the first failure
    pub async fn resolve_batch(
        &self,
        words: &[String],
        source: LanguageCode,
        target: LanguageCode,
        category: Option<&str>,
    ) -> Result<Vec<Translation>, ResolveError> {
        let mut translations = Vec::with_capacity(words.len());
        for word in words {
            translations.push(self.resolve(word, source, target, category).await?);
        }
        Ok(translations)
    }

    async fn resolve_remote(
        &self,
        word: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Option<Translation> {
        if !self.mirror.is_enabled() {
            return None;
        }

        let record = self.mirror.search(target, word, 1).await.into_iter().next()?;
        let mut translation = record.into_translation(source, target);

        // a fetched record is presented for review like any other candidate
        translation.status = TranslationStatus::Pending;
        translation.verified_at = None;
        Some(translation)
    }

    fn resolve_local(&self, word: &str, target: LanguageCode) -> Result<String, ResolveError> {
        let list = self
            .word_lists
            .get(target)
            .map_err(|source| ResolveError::Dataset {
                language: target,
                source,
            })?;

        if list.is_empty() {
            tracing::warn!("No translation data available for {target}");
            return Ok(placeholder(target, word));
        }

        for tier in MatchTier::ORDER {
            if let Some(entry) = list.find(word, tier) {
                tracing::debug!("Matched {word:?} to {:?} ({tier:?})", entry.english());
                return Ok(match entry.translation(target) {
                    Some(translated) if !translated.is_empty() => translated.to_string(),
                    _ => missing_translation(target),
                });
            }
        }

        Ok(placeholder(target, word))
    }
}
