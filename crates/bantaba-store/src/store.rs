use std::sync::Arc;

use bantaba_types::{DatasetExport, Translation, VerificationResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::kv::KeyValueStore;
use crate::stats::StoreStats;

pub const TRANSLATIONS_KEY: &str = "@bantaba_translations";
pub const VERIFICATIONS_KEY: &str = "@bantaba_verifications";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Stored collection {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Durable translation/verification collections over a key-value medium.
///
/// Every collection is stored whole under one key, so each write is a
/// read-modify-write cycle. `write_lock` serialises those cycles; the store
/// is the only writer of its keys.
pub struct LocalStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn append_translation(&self, translation: Translation) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut translations: Vec<Translation> = self.read_collection(TRANSLATIONS_KEY).await?;
        tracing::debug!("Appending translation {}", translation.id);
        translations.push(translation);
        self.write_collection(TRANSLATIONS_KEY, &translations).await
    }

    /// Append several translations in one write
    pub async fn import_translations(
        &self,
        imported: Vec<Translation>,
    ) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut translations: Vec<Translation> = self.read_collection(TRANSLATIONS_KEY).await?;
        let count = imported.len();
        translations.extend(imported);
        self.write_collection(TRANSLATIONS_KEY, &translations).await?;

        tracing::info!("Imported {count} translations");
        Ok(count)
    }

    pub async fn list_translations(&self) -> Result<Vec<Translation>, StoreError> {
        self.read_collection(TRANSLATIONS_KEY).await
    }

    /// First stored translation with `id`
    pub async fn find_translation(&self, id: &str) -> Result<Option<Translation>, StoreError> {
        Ok(self
            .list_translations()
            .await?
            .into_iter()
            .find(|t| t.id == id))
    }

    pub async fn append_verification(
        &self,
        verification: VerificationResult,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut verifications: Vec<VerificationResult> =
            self.read_collection(VERIFICATIONS_KEY).await?;
        verifications.push(verification);
        self.write_collection(VERIFICATIONS_KEY, &verifications).await
    }

    pub async fn list_verifications(&self) -> Result<Vec<VerificationResult>, StoreError> {
        self.read_collection(VERIFICATIONS_KEY).await
    }

    /// Apply `mutator` to the first translation with `id` and persist the
    /// collection. Returns the updated record, or `None` when no translation
    /// has that id. Nothing is written if `mutator` returns `false`.
    pub async fn update_translation<F>(
        &self,
        id: &str,
        mutator: F,
    ) -> Result<Option<Translation>, StoreError>
    where
        F: FnOnce(&mut Translation) -> bool + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut translations: Vec<Translation> = self.read_collection(TRANSLATIONS_KEY).await?;
        let Some(translation) = translations.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        let changed = mutator(translation);
        let updated = translation.clone();

        if changed {
            self.write_collection(TRANSLATIONS_KEY, &translations).await?;
        }

        Ok(Some(updated))
    }

    pub async fn export_all(&self) -> Result<DatasetExport, StoreError> {
        Ok(DatasetExport {
            translations: self.list_translations().await?,
            verifications: self.list_verifications().await?,
        })
    }

    pub async fn stats(&self) -> Result<StoreStats, StoreError> {
        Ok(StoreStats::from_translations(&self.list_translations().await?))
    }

    async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.kv.get(key).await? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    async fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items)?;
        self.kv.set(key, raw).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use bantaba_types::{GeneratedBy, LanguageCode, TranslationStatus};
    use chrono::Utc;

    use super::*;
    use crate::kv::{FileKv, MemoryKv};

    fn translation(id: &str, target: LanguageCode) -> Translation {
        Translation {
            id: id.into(),
            source_word: "water".into(),
            target_word: "ndox".into(),
            source_language: LanguageCode::En,
            target_language: target,
            status: TranslationStatus::Pending,
            generated_by: GeneratedBy::Api,
            created_at: Utc::now(),
            verified_at: None,
            category: None,
            difficulty: None,
            remote_id: None,
        }
    }

    fn verification(id: &str) -> VerificationResult {
        VerificationResult {
            translation_id: id.into(),
            is_correct: true,
            corrected_word: None,
            notes: None,
            verified_by: "user".into(),
            verified_at: Utc::now(),
        }
    }

    fn memory_store() -> LocalStore {
        LocalStore::new(Arc::new(MemoryKv::new()))
    }

    #[tokio::test]
    async fn export_keeps_insertion_order() {
        let store = memory_store();
        for i in 0..5 {
            store
                .append_translation(translation(&format!("t{i}"), LanguageCode::Wo))
                .await
                .unwrap();
        }
        for i in [3, 1, 3] {
            store.append_verification(verification(&format!("t{i}"))).await.unwrap();
        }

        let export = store.export_all().await.unwrap();
        let ids: Vec<_> = export.translations.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t0", "t1", "t2", "t3", "t4"]);

        let refs: Vec<_> = export
            .verifications
            .iter()
            .map(|v| v.translation_id.as_str())
            .collect();
        assert_eq!(refs, ["t3", "t1", "t3"]);
    }

    #[tokio::test]
    async fn update_reports_missing_ids() {
        let store = memory_store();
        store.append_translation(translation("t1", LanguageCode::Ff)).await.unwrap();

        let missing = store.update_translation("nope", |_| true).await.unwrap();
        assert!(missing.is_none());

        let updated = store
            .update_translation("t1", |t| t.apply_verdict(false, Some("X"), Utc::now()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.target_word, "X");

        let stored = store.find_translation("t1").await.unwrap().unwrap();
        assert_eq!(stored.status, TranslationStatus::Corrected);
        assert_eq!(stored.target_word, "X");
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let store = Arc::new(memory_store());

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .append_translation(translation(&format!("t{i}"), LanguageCode::Mnk))
                        .await
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.list_translations().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn corrupt_collection_is_reported() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(TRANSLATIONS_KEY, "{not json".into()).await.unwrap();

        let store = LocalStore::new(kv);
        let err = store.list_translations().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(store.list_verifications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = LocalStore::new(Arc::new(FileKv::new(dir.path())));
        store.append_translation(translation("t1", LanguageCode::Dyo)).await.unwrap();
        store.append_verification(verification("t1")).await.unwrap();
        drop(store);

        let reopened = LocalStore::new(Arc::new(FileKv::new(dir.path())));
        let export = reopened.export_all().await.unwrap();
        assert_eq!(export.translations.len(), 1);
        assert_eq!(export.verifications.len(), 1);
        assert_eq!(export.translations[0].target_language, LanguageCode::Dyo);
    }

    struct FailingKv;

    #[async_trait]
    impl KeyValueStore for FailingKv {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
            Err(StoreError::Backend("disk full".into()))
        }
    }

    #[tokio::test]
    async fn write_failures_surface() {
        let store = LocalStore::new(Arc::new(FailingKv));
        let err = store
            .append_translation(translation("t1", LanguageCode::Wo))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
