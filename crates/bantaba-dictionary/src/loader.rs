use std::io::ErrorKind;
use std::path::Path;

use bantaba_types::LanguageCode;

use crate::types::{LoadError, WordList};

pub struct WordListLoader;

impl WordListLoader {
    /// Load `<dir>/<language>_lang.json`. A missing file is an empty list,
    /// not an error; unreadable or malformed files are.
    pub fn load_from_dir(dir: &Path, language: LanguageCode) -> Result<WordList, LoadError> {
        Self::load_from_file(&dir.join(language.dataset_file()), language)
    }

    pub fn load_from_file(path: &Path, language: LanguageCode) -> Result<WordList, LoadError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("No word list for {} at {}", language, path.display());
                return Ok(WordList::empty(language));
            }
            Err(e) => return Err(e.into()),
        };

        // bundled placeholders for languages without data are zero-byte files
        if json.trim().is_empty() {
            tracing::warn!("Word list for {} at {} is empty", language, path.display());
            return Ok(WordList::empty(language));
        }

        let list = WordList::from_json(language, &json)?;
        tracing::info!(
            "Loaded {} {} entries from {}",
            list.entry_count(),
            language,
            path.display()
        );
        Ok(list)
    }
}
