use bantaba_types::{Difficulty, GeneratedBy, LanguageCode, Translation, TranslationStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Translation record as the backend returns it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteTranslation {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub english_word: String,
    pub translated_word: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl RemoteTranslation {
    /// Convert to a local record. Unknown status strings read as pending.
    /// The backend keeps no verification time, so a reviewed record takes
    /// its creation time as `verified_at`.
    pub fn into_translation(self, source: LanguageCode, target: LanguageCode) -> Translation {
        let status = self
            .status
            .as_deref()
            .and_then(TranslationStatus::parse)
            .unwrap_or_default();
        let created_at = self.created_at.unwrap_or_else(Utc::now);

        Translation {
            remote_id: Some(self.id.clone()),
            id: self.id,
            source_word: self.english_word,
            target_word: self.translated_word,
            source_language: source,
            target_language: target,
            status,
            generated_by: GeneratedBy::Api,
            created_at,
            verified_at: (status != TranslationStatus::Pending).then_some(created_at),
            category: self.category,
            difficulty: self.difficulty.as_deref().and_then(Difficulty::parse),
        }
    }
}

/// The backend uses integer ids; accept strings as well
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Body of `POST /translations`
#[derive(Debug, Serialize)]
pub(crate) struct CreateRequest<'a> {
    pub english_word: &'a str,
    pub language_code: LanguageCode,
    pub translated_word: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl<'a> From<&'a Translation> for CreateRequest<'a> {
    fn from(t: &'a Translation) -> Self {
        Self {
            english_word: &t.source_word,
            language_code: t.target_language,
            translated_word: &t.target_word,
            category: t.category.as_deref(),
            difficulty: t.difficulty,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateResponse {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
}

/// Partial update pushed with `PUT /translations/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TranslationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TranslationStatus>,
}

impl From<&Translation> for TranslationUpdate {
    fn from(t: &Translation) -> Self {
        Self {
            translated_word: Some(t.target_word.clone()),
            category: t.category.clone(),
            difficulty: t.difficulty,
            status: Some(t.status),
        }
    }
}
