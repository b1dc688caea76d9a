use bantaba_config::remote::RemoteConfig;
use bantaba_types::{LanguageCode, Translation};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::record::{CreateRequest, CreateResponse, RemoteTranslation, TranslationUpdate};

/// Outcome of a mirror write
#[derive(Debug, Clone, PartialEq)]
pub enum Mirror<T> {
    /// Mirroring is turned off; nothing was sent
    Disabled,
    Synced(T),
}

impl<T> Mirror<T> {
    pub fn synced(self) -> Option<T> {
        match self {
            Mirror::Synced(value) => Some(value),
            Mirror::Disabled => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("Failed to decode response: {0}")]
    DecodeError(String),
}

/// HTTP client for the translation backend
#[derive(Clone)]
pub struct RemoteMirror {
    enabled: bool,
    base_url: String,
    client: reqwest::Client,
}

impl RemoteMirror {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            enabled: config.enabled,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// A mirror that never sends anything
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            base_url: String::new(),
            client: reqwest::Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Create the translation remotely, returning the backend id
    pub async fn create(&self, translation: &Translation) -> Result<Mirror<String>, RemoteError> {
        if !self.enabled {
            tracing::debug!("Backend disabled, skipping create of {}", translation.id);
            return Ok(Mirror::Disabled);
        }

        let response = self
            .client
            .post(self.url("translations"))
            .json(&CreateRequest::from(translation))
            .send()
            .await?;

        let created: CreateResponse = Self::decode(response).await?;
        tracing::info!("Mirrored translation {} as {}", translation.id, created.id);
        Ok(Mirror::Synced(created.id))
    }

    pub async fn update(
        &self,
        id: &str,
        update: &TranslationUpdate,
    ) -> Result<Mirror<RemoteTranslation>, RemoteError> {
        if !self.enabled {
            tracing::debug!("Backend disabled, skipping update of {id}");
            return Ok(Mirror::Disabled);
        }

        let response = self
            .client
            .put(self.url(&format!("translations/{id}")))
            .json(update)
            .send()
            .await?;

        let updated = Self::decode(response).await?;
        tracing::info!("Updated remote translation {id}");
        Ok(Mirror::Synced(updated))
    }

    /// Search remote records. Failures degrade to an empty result.
    pub async fn search(
        &self,
        language: LanguageCode,
        query: &str,
        limit: usize,
    ) -> Vec<RemoteTranslation> {
        if !self.enabled {
            return Vec::new();
        }

        let mut params = Vec::with_capacity(2);
        if !query.is_empty() {
            params.push(("q", query.to_string()));
        }
        params.push(("limit", limit.to_string()));

        let request = self
            .client
            .get(self.url(&format!("translations/search/{language}")))
            .query(&params);

        let result: Result<Vec<RemoteTranslation>, RemoteError> = async {
            let response = request.send().await?;
            Self::decode(response).await
        }
        .await;

        match result {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Remote search for {query:?} ({language}) failed: {e}");
                Vec::new()
            }
        }
    }

    /// Random remote record for `language`; `None` on 404 or failure
    pub async fn random_one(&self, language: LanguageCode) -> Option<RemoteTranslation> {
        if !self.enabled {
            return None;
        }

        let result: Result<Option<RemoteTranslation>, RemoteError> = async {
            let response = self
                .client
                .get(self.url(&format!("translations/random/{language}")))
                .send()
                .await?;

            if response.status() == StatusCode::NOT_FOUND {
                tracing::info!("No random translations available for {language}");
                return Ok(None);
            }

            Self::decode(response).await.map(Some)
        }
        .await;

        result.unwrap_or_else(|e| {
            tracing::warn!("Remote random draw for {language} failed: {e}");
            None
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RemoteError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::HttpStatus { status, body });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| RemoteError::DecodeError(e.to_string()))
    }
}
