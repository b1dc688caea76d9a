use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use bantaba_types::LanguageCode;
use parking_lot::RwLock;

use crate::loader::WordListLoader;
use crate::types::{LoadError, WordList};

/// Per-language word lists. Directory-backed lists are read on first use
/// and cached; a failed load is not cached so the next access retries.
pub struct WordLists {
    dir: Option<PathBuf>,
    cache: RwLock<HashMap<LanguageCode, Arc<WordList>>>,
}

impl WordLists {
    /// Lazily load lists from `dir`
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fixed in-memory lists; languages not given are empty
    pub fn from_lists(lists: impl IntoIterator<Item = WordList>) -> Self {
        let cache = lists
            .into_iter()
            .map(|list| (list.language(), Arc::new(list)))
            .collect();

        Self {
            dir: None,
            cache: RwLock::new(cache),
        }
    }

    pub fn get(&self, language: LanguageCode) -> Result<Arc<WordList>, LoadError> {
        if let Some(list) = self.cache.read().get(&language) {
            return Ok(Arc::clone(list));
        }

        // the source language has no word list of its own
        let list = match &self.dir {
            Some(dir) if !language.is_source() => WordListLoader::load_from_dir(dir, language)?,
            _ => WordList::empty(language),
        };

        let mut cache = self.cache.write();
        let list = cache.entry(language).or_insert_with(|| Arc::new(list));
        Ok(Arc::clone(list))
    }

    pub fn entry_count(&self, language: LanguageCode) -> Result<usize, LoadError> {
        Ok(self.get(language)?.entry_count())
    }
}
