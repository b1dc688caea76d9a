use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported language codes. `En` is the only source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Mnk,
    Wo,
    Dyo,
    Ff,
}

impl LanguageCode {
    pub const SOURCE: LanguageCode = LanguageCode::En;

    pub const ALL: [LanguageCode; 5] = [
        LanguageCode::En,
        LanguageCode::Mnk,
        LanguageCode::Wo,
        LanguageCode::Dyo,
        LanguageCode::Ff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Mnk => "mnk",
            LanguageCode::Wo => "wo",
            LanguageCode::Dyo => "dyo",
            LanguageCode::Ff => "ff",
        }
    }

    /// Field name holding this language's word in a word-list entry
    pub fn dataset_key(&self) -> &'static str {
        match self {
            LanguageCode::En => "english",
            LanguageCode::Mnk => "mandinka",
            LanguageCode::Wo => "wolof",
            LanguageCode::Dyo => "jola",
            LanguageCode::Ff => "fula",
        }
    }

    /// Bundled word-list file name, e.g. `wolof_lang.json`
    pub fn dataset_file(&self) -> String {
        format!("{}_lang.json", self.dataset_key())
    }

    pub fn is_source(&self) -> bool {
        *self == Self::SOURCE
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown language code: {0}")]
pub struct ParseLanguageError(pub String);

impl FromStr for LanguageCode {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        LanguageCode::ALL
            .into_iter()
            .find(|c| c.as_str() == code)
            .ok_or_else(|| ParseLanguageError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    #[default]
    Pending,
    Verified,
    Corrected,
}

impl TranslationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationStatus::Pending => "pending",
            TranslationStatus::Verified => "verified",
            TranslationStatus::Corrected => "corrected",
        }
    }

    /// Lenient parse for records coming from outside; unknown values are `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(TranslationStatus::Pending),
            "verified" => Some(TranslationStatus::Verified),
            "corrected" => Some(TranslationStatus::Corrected),
            _ => None,
        }
    }
}

/// Provenance of a candidate translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratedBy {
    Ai,
    Api,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Difficulty::Basic),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

/// A single source -> target word pair under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub id: String,
    pub source_word: String,
    pub target_word: String,
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
    #[serde(default)]
    pub status: TranslationStatus,
    pub generated_by: GeneratedBy,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Backend id once the record has been mirrored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
}

impl Translation {
    pub fn is_pending(&self) -> bool {
        self.status == TranslationStatus::Pending
    }

    /// Apply a verdict. Only a pending translation transitions; returns
    /// whether anything changed.
    pub fn apply_verdict(
        &mut self,
        is_correct: bool,
        corrected_word: Option<&str>,
        at: DateTime<Utc>,
    ) -> bool {
        if !self.is_pending() {
            return false;
        }

        self.status = if is_correct {
            TranslationStatus::Verified
        } else {
            TranslationStatus::Corrected
        };
        self.verified_at = Some(at);

        if let Some(word) = corrected_word {
            self.target_word = word.to_string();
        }

        true
    }
}

/// Immutable record of one user judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub translation_id: String,
    pub is_correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub verified_by: String,
    pub verified_at: DateTime<Utc>,
}

/// Display metadata for a supported language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub code: LanguageCode,
    pub name: &'static str,
    pub native_name: &'static str,
    pub flag: &'static str,
    pub region: &'static str,
}

/// Full accumulated corpus
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetExport {
    pub translations: Vec<Translation>,
    pub verifications: Vec<VerificationResult>,
}
