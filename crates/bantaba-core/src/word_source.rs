use std::sync::Arc;

use bantaba_dictionary::WordLists;
use bantaba_types::LanguageCode;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::sample::all_sample_words;

/// Returned for a word-list entry whose `english` field is missing, not a
/// string, or blank (empty or whitespace only)
pub const MALFORMED_ENTRY_WORD: &str = "hello";

/// Supplies the next English word to translate
pub struct WordSource {
    word_lists: Arc<WordLists>,
    fallback: Vec<&'static str>,
}

impl WordSource {
    pub fn new(word_lists: Arc<WordLists>) -> Self {
        Self {
            word_lists,
            fallback: all_sample_words(),
        }
    }

    pub fn fallback_words(&self) -> &[&'static str] {
        &self.fallback
    }

    pub fn pick_word(&self, target: LanguageCode) -> String {
        self.pick_word_with(target, &mut rand::thread_rng())
    }

    /// Uniform pick from the target's word list, or from the built-in
    /// vocabulary when the list is empty or cannot be read. Never empty.
    pub fn pick_word_with<R: Rng + ?Sized>(&self, target: LanguageCode, rng: &mut R) -> String {
        let list = match self.word_lists.get(target) {
            Ok(list) => Some(list),
            Err(e) => {
                tracing::warn!("Word list for {target} unreadable, using sample words: {e}");
                None
            }
        };

        if let Some(entry) = list.as_ref().and_then(|l| l.entries().choose(rng)) {
            return match entry.english() {
                Some(word) if !word.trim().is_empty() => word.to_string(),
                _ => MALFORMED_ENTRY_WORD.to_string(),
            };
        }

        self.fallback
            .choose(rng)
            .copied()
            .unwrap_or(MALFORMED_ENTRY_WORD)
            .to_string()
    }
}
