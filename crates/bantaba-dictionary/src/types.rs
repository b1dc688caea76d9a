use bantaba_types::LanguageCode;
use serde_json::{Map, Value};

/// One bilingual row: `{ "english": ..., "<language key>": ... }`.
/// Rows are kept even when malformed; accessors return `None` for
/// missing or non-string fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordEntry {
    fields: Map<String, Value>,
}

impl WordEntry {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn english(&self) -> Option<&str> {
        self.field("english")
    }

    /// Word for `language`, looked up under its dataset key
    pub fn translation(&self, language: LanguageCode) -> Option<&str> {
        self.field(language.dataset_key())
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

impl From<Value> for WordEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

/// How a query is compared against an entry's `english` field.
/// All tiers compare case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// `english == word`
    Exact,
    /// `english` contains `word`
    Contains,
    /// `word` contains `english`
    ContainedIn,
}

impl MatchTier {
    /// Tiers in the order they are tried
    pub const ORDER: [MatchTier; 3] = [MatchTier::Exact, MatchTier::Contains, MatchTier::ContainedIn];

    fn matches(&self, english: &str, word: &str) -> bool {
        match self {
            MatchTier::Exact => english == word,
            MatchTier::Contains => english.contains(word),
            // an empty headword is contained in every word
            MatchTier::ContainedIn => !english.is_empty() && word.contains(english),
        }
    }
}

/// Ordered, read-only word list for one target language
#[derive(Debug, Clone)]
pub struct WordList {
    language: LanguageCode,
    entries: Vec<WordEntry>,
}

impl WordList {
    pub fn new(language: LanguageCode, entries: Vec<WordEntry>) -> Self {
        Self { language, entries }
    }

    pub fn empty(language: LanguageCode) -> Self {
        Self::new(language, Vec::new())
    }

    /// Parse a JSON array of entry objects
    pub fn from_json(language: LanguageCode, json: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(json)?;

        let Value::Array(items) = value else {
            return Err(LoadError::InvalidFormat(format!(
                "{} word list is not a JSON array",
                language
            )));
        };

        Ok(Self::new(
            language,
            items.into_iter().map(WordEntry::from).collect(),
        ))
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry, in list order, whose `english` field satisfies `tier`
    pub fn find(&self, word: &str, tier: MatchTier) -> Option<&WordEntry> {
        let word = word.to_lowercase();

        self.entries.iter().find(|entry| {
            entry
                .english()
                .is_some_and(|english| tier.matches(&english.to_lowercase(), &word))
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
