use std::sync::Arc;

use bantaba_remote::{Mirror, RemoteMirror, TranslationUpdate};
use bantaba_store::LocalStore;
use bantaba_types::{Translation, VerificationResult};
use chrono::Utc;

use crate::error::RecordError;

/// A user's verdict on one translation
#[derive(Debug, Clone)]
pub struct VerdictRequest {
    pub translation_id: String,
    pub is_correct: bool,
    pub corrected_word: Option<String>,
    pub notes: Option<String>,
    pub verified_by: String,
}

/// Records verdicts locally and mirrors the resulting status remotely.
///
/// The first verdict on a translation decides its status. Later verdicts
/// are kept in the verification history but leave the translation as is.
pub struct VerificationRecorder {
    store: Arc<LocalStore>,
    mirror: Arc<RemoteMirror>,
}

impl VerificationRecorder {
    pub fn new(store: Arc<LocalStore>, mirror: Arc<RemoteMirror>) -> Self {
        Self { store, mirror }
    }

    pub async fn record_verdict(
        &self,
        request: VerdictRequest,
    ) -> Result<VerificationResult, RecordError> {
        let verified_at = Utc::now();
        let corrected_word = request
            .corrected_word
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty());

        let result = VerificationResult {
            translation_id: request.translation_id,
            is_correct: request.is_correct,
            corrected_word,
            notes: request.notes,
            verified_by: request.verified_by,
            verified_at,
        };

        self.store.append_verification(result.clone()).await?;

        let mut applied = false;
        let updated = self
            .store
            .update_translation(&result.translation_id, |t| {
                applied = t.apply_verdict(
                    result.is_correct,
                    result.corrected_word.as_deref(),
                    verified_at,
                );
                applied
            })
            .await?;

        match updated {
            None => {
                tracing::warn!(
                    "Verification recorded for unknown translation {}",
                    result.translation_id
                );
            }
            Some(translation) if !applied => {
                tracing::info!(
                    "Translation {} already {}, keeping first verdict",
                    translation.id,
                    translation.status.as_str()
                );
            }
            Some(translation) => {
                tracing::info!(
                    "Translation {} marked {}",
                    translation.id,
                    translation.status.as_str()
                );
                self.mirror_verdict(&translation).await;
            }
        }

        Ok(result)
    }

    /// Local state is already committed; failures here are only logged
    async fn mirror_verdict(&self, translation: &Translation) {
        let Some(remote_id) = translation.remote_id.as_deref() else {
            tracing::debug!("Translation {} was never mirrored", translation.id);
            return;
        };

        match self
            .mirror
            .update(remote_id, &TranslationUpdate::from(translation))
            .await
        {
            Ok(Mirror::Synced(_)) => {}
            Ok(Mirror::Disabled) => {
                tracing::debug!("Backend disabled, verdict for {remote_id} kept local");
            }
            Err(e) => {
                tracing::warn!("Failed to mirror verdict for {remote_id}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use bantaba_config::remote::RemoteConfig;
    use bantaba_store::{KeyValueStore, MemoryKv, StoreError};
    use bantaba_types::{GeneratedBy, LanguageCode, TranslationStatus};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn pending(id: &str, remote_id: Option<&str>) -> Translation {
        Translation {
            id: id.into(),
            source_word: "water".into(),
            target_word: "ndox".into(),
            source_language: LanguageCode::En,
            target_language: LanguageCode::Wo,
            status: TranslationStatus::Pending,
            generated_by: GeneratedBy::Api,
            created_at: Utc::now(),
            verified_at: None,
            category: None,
            difficulty: None,
            remote_id: remote_id.map(str::to_string),
        }
    }

    fn verdict(id: &str, is_correct: bool, corrected: Option<&str>) -> VerdictRequest {
        VerdictRequest {
            translation_id: id.into(),
            is_correct,
            corrected_word: corrected.map(str::to_string),
            notes: None,
            verified_by: "user".into(),
        }
    }

    async fn seeded(translations: Vec<Translation>) -> Arc<LocalStore> {
        let store = Arc::new(LocalStore::new(Arc::new(MemoryKv::new())));
        for t in translations {
            store.append_translation(t).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn correct_verdict_marks_verified() {
        let store = seeded(vec![pending("t1", None)]).await;
        let recorder = VerificationRecorder::new(store.clone(), Arc::new(RemoteMirror::disabled()));

        let result = recorder.record_verdict(verdict("t1", true, None)).await.unwrap();
        assert!(result.is_correct);

        let stored = store.find_translation("t1").await.unwrap().unwrap();
        assert_eq!(stored.status, TranslationStatus::Verified);
        assert_eq!(stored.verified_at, Some(result.verified_at));
        assert_eq!(stored.target_word, "ndox");
    }

    #[tokio::test]
    async fn correction_overwrites_target_word() {
        let store = seeded(vec![pending("t1", None)]).await;
        let recorder = VerificationRecorder::new(store.clone(), Arc::new(RemoteMirror::disabled()));

        recorder
            .record_verdict(verdict("t1", false, Some("X")))
            .await
            .unwrap();

        let stored = store.find_translation("t1").await.unwrap().unwrap();
        assert_eq!(stored.status, TranslationStatus::Corrected);
        assert_eq!(stored.target_word, "X");
        assert!(stored.verified_at.is_some());
    }

    #[tokio::test]
    async fn blank_correction_is_ignored() {
        let store = seeded(vec![pending("t1", None)]).await;
        let recorder = VerificationRecorder::new(store.clone(), Arc::new(RemoteMirror::disabled()));

        let result = recorder
            .record_verdict(verdict("t1", false, Some("   ")))
            .await
            .unwrap();
        assert_eq!(result.corrected_word, None);

        let stored = store.find_translation("t1").await.unwrap().unwrap();
        assert_eq!(stored.target_word, "ndox");
        assert_eq!(stored.status, TranslationStatus::Corrected);
    }

    #[tokio::test]
    async fn unknown_translation_still_records() {
        let store = seeded(vec![]).await;
        let recorder = VerificationRecorder::new(store.clone(), Arc::new(RemoteMirror::disabled()));

        recorder.record_verdict(verdict("ghost", true, None)).await.unwrap();

        assert_eq!(store.list_verifications().await.unwrap().len(), 1);
        assert!(store.list_translations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_verdict_wins() {
        let store = seeded(vec![pending("t1", None)]).await;
        let recorder = VerificationRecorder::new(store.clone(), Arc::new(RemoteMirror::disabled()));

        recorder.record_verdict(verdict("t1", true, None)).await.unwrap();
        recorder
            .record_verdict(verdict("t1", false, Some("other")))
            .await
            .unwrap();

        let stored = store.find_translation("t1").await.unwrap().unwrap();
        assert_eq!(stored.status, TranslationStatus::Verified);
        assert_eq!(stored.target_word, "ndox");
        assert_eq!(store.list_verifications().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn verdict_is_mirrored_once() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/translations/42"))
            .and(body_json(json!({"translated_word": "ndoxx", "status": "corrected"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 42, "english_word": "water", "translated_word": "ndoxx", "status": "corrected"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mirror = RemoteMirror::new(&RemoteConfig {
            enabled: true,
            base_url: server.uri(),
            timeout_ms: 2_000,
        })
        .unwrap();
        let store = seeded(vec![pending("t1", Some("42"))]).await;
        let recorder = VerificationRecorder::new(store, Arc::new(mirror));

        recorder
            .record_verdict(verdict("t1", false, Some("ndoxx")))
            .await
            .unwrap();
        recorder.record_verdict(verdict("t1", true, None)).await.unwrap();
    }

    #[tokio::test]
    async fn mirror_failure_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let mirror = RemoteMirror::new(&RemoteConfig {
            enabled: true,
            base_url: server.uri(),
            timeout_ms: 2_000,
        })
        .unwrap();
        let store = seeded(vec![pending("t1", Some("42"))]).await;
        let recorder = VerificationRecorder::new(store.clone(), Arc::new(mirror));

        recorder.record_verdict(verdict("t1", true, None)).await.unwrap();

        let stored = store.find_translation("t1").await.unwrap().unwrap();
        assert_eq!(stored.status, TranslationStatus::Verified);
    }

    struct ReadOnlyKv;

    #[async_trait]
    impl KeyValueStore for ReadOnlyKv {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
            Err(StoreError::Backend("read-only medium".into()))
        }
    }

    #[tokio::test]
    async fn local_write_failure_is_surfaced() {
        let store = Arc::new(LocalStore::new(Arc::new(ReadOnlyKv)));
        let recorder = VerificationRecorder::new(store, Arc::new(RemoteMirror::disabled()));

        let err = recorder.record_verdict(verdict("t1", true, None)).await.unwrap_err();
        assert!(matches!(err, RecordError::Store(StoreError::Backend(_))));
    }
}
