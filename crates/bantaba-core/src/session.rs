use std::sync::Arc;

use bantaba_dictionary::{LoadError, WordLists};
use bantaba_remote::{Mirror, RemoteMirror};
use bantaba_store::{LocalStore, StoreError, StoreStats};
use bantaba_types::{DatasetExport, LanguageCode, Translation, VerificationResult};

use crate::error::{RecordError, SessionError};
use crate::import::parse_csv;
use crate::recorder::{VerdictRequest, VerificationRecorder};
use crate::resolver::TranslationResolver;
use crate::word_source::WordSource;

/// Wires the word source, resolver, recorder and stores for one user
/// session. Callers await each operation before starting a dependent one.
pub struct VerificationSession {
    word_lists: Arc<WordLists>,
    store: Arc<LocalStore>,
    mirror: Arc<RemoteMirror>,
    word_source: WordSource,
    resolver: TranslationResolver,
    recorder: VerificationRecorder,
}

impl VerificationSession {
    pub fn new(word_lists: Arc<WordLists>, store: Arc<LocalStore>, mirror: Arc<RemoteMirror>) -> Self {
        Self {
            word_source: WordSource::new(Arc::clone(&word_lists)),
            resolver: TranslationResolver::new(Arc::clone(&word_lists), Arc::clone(&mirror)),
            recorder: VerificationRecorder::new(Arc::clone(&store), Arc::clone(&mirror)),
            word_lists,
            store,
            mirror,
        }
    }

    pub fn word_source(&self) -> &WordSource {
        &self.word_source
    }

    pub fn resolver(&self) -> &TranslationResolver {
        &self.resolver
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Pick a word for `target` and present its candidate translation
    pub async fn next_translation(
        &self,
        target: LanguageCode,
        category: Option<&str>,
    ) -> Result<Translation, SessionError> {
        let word = self.word_source.pick_word(target);
        self.present(&word, target, category).await
    }

    /// Resolve `word`, commit it locally, then mirror it best-effort
    pub async fn present(
        &self,
        word: &str,
        target: LanguageCode,
        category: Option<&str>,
    ) -> Result<Translation, SessionError> {
        let translation = self
            .resolver
            .resolve(word, LanguageCode::SOURCE, target, category)
            .await?;

        self.commit(translation).await
    }

    /// Resolve and commit several words, in order
    pub async fn present_batch(
        &self,
        words: &[String],
        target: LanguageCode,
        category: Option<&str>,
    ) -> Result<Vec<Translation>, SessionError> {
        let translations = self
            .resolver
            .resolve_batch(words, LanguageCode::SOURCE, target, category)
            .await?;

        let mut committed = Vec::with_capacity(translations.len());
        for translation in translations {
            committed.push(self.commit(translation).await?);
        }
        Ok(committed)
    }

    pub async fn submit_verdict(
        &self,
        request: VerdictRequest,
    ) -> Result<VerificationResult, RecordError> {
        self.recorder.record_verdict(request).await
    }

    /// Import a `source,target[,category]` CSV; returns the number stored
    pub async fn import_csv(&self, csv: &str, target: LanguageCode) -> Result<usize, StoreError> {
        let translations = parse_csv(csv, LanguageCode::SOURCE, target);
        if translations.is_empty() {
            tracing::warn!("No importable rows for {target}");
            return Ok(0);
        }
        self.store.import_translations(translations).await
    }

    /// Random record from the backend, if any
    pub async fn remote_random(&self, target: LanguageCode) -> Option<Translation> {
        self.mirror
            .random_one(target)
            .await
            .map(|record| record.into_translation(LanguageCode::SOURCE, target))
    }

    pub async fn stats(&self) -> Result<StoreStats, StoreError> {
        self.store.stats().await
    }

    pub async fn export(&self) -> Result<DatasetExport, StoreError> {
        self.store.export_all().await
    }

    /// Word-list size per target language
    pub fn dataset_stats(&self) -> Vec<(LanguageCode, Result<usize, LoadError>)> {
        LanguageCode::ALL
            .into_iter()
            .filter(|code| !code.is_source())
            .map(|code| (code, self.word_lists.entry_count(code)))
            .collect()
    }

    async fn commit(&self, mut translation: Translation) -> Result<Translation, SessionError> {
        // a backend hit keeps the backend id and is saved at most once
        if translation.remote_id.is_some() {
            if let Some(existing) = self.store.find_translation(&translation.id).await? {
                tracing::debug!("Translation {} already saved, reusing it", existing.id);
                return Ok(existing);
            }
        }

        self.store.append_translation(translation.clone()).await?;
        tracing::info!(
            "Saved translation {} ({} -> {})",
            translation.id,
            translation.source_word,
            translation.target_word
        );

        if translation.remote_id.is_some() {
            return Ok(translation);
        }

        let remote_id = match self.mirror.create(&translation).await {
            Ok(Mirror::Synced(remote_id)) => remote_id,
            Ok(Mirror::Disabled) => return Ok(translation),
            Err(e) => {
                tracing::warn!("Failed to mirror translation {}: {e}", translation.id);
                return Ok(translation);
            }
        };

        let linked = remote_id.clone();
        let saved = self
            .store
            .update_translation(&translation.id, move |t| {
                t.remote_id = Some(linked);
                true
            })
            .await;

        match saved {
            Ok(_) => translation.remote_id = Some(remote_id),
            Err(e) => {
                tracing::warn!(
                    "Translation {} mirrored as {remote_id} but link was not saved: {e}",
                    translation.id
                );
            }
        }

        Ok(translation)
    }
}

#[cfg(test)]
mod tests {
    use bantaba_config::remote::RemoteConfig;
    use bantaba_dictionary::WordList;
    use bantaba_store::MemoryKv;
    use bantaba_types::TranslationStatus;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn wolof() -> WordList {
        WordList::from_json(LanguageCode::Wo, r#"[{"english":"water","wolof":"ndox"}]"#).unwrap()
    }

    fn session(mirror: RemoteMirror) -> VerificationSession {
        VerificationSession::new(
            Arc::new(WordLists::from_lists([wolof()])),
            Arc::new(LocalStore::new(Arc::new(MemoryKv::new()))),
            Arc::new(mirror),
        )
    }

    fn enabled_mirror(server: &MockServer) -> RemoteMirror {
        RemoteMirror::new(&RemoteConfig {
            enabled: true,
            base_url: server.uri(),
            timeout_ms: 2_000,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn next_translation_is_persisted() {
        let session = session(RemoteMirror::disabled());

        let t = session.next_translation(LanguageCode::Wo, None).await.unwrap();
        assert_eq!(t.source_word, "water");
        assert_eq!(t.target_word, "ndox");
        assert_eq!(t.source_language, LanguageCode::En);

        let stored = session.store().list_translations().await.unwrap();
        assert_eq!(stored, vec![t]);
    }

    #[tokio::test]
    async fn full_review_cycle() {
        let session = session(RemoteMirror::disabled());

        let water = session.present("water", LanguageCode::Wo, None).await.unwrap();
        let cat = session.present("cat", LanguageCode::Ff, None).await.unwrap();
        assert_eq!(cat.target_word, "[FF] cat");

        session
            .submit_verdict(VerdictRequest {
                translation_id: water.id.clone(),
                is_correct: true,
                corrected_word: None,
                notes: Some("common word".into()),
                verified_by: "user".into(),
            })
            .await
            .unwrap();
        session
            .submit_verdict(VerdictRequest {
                translation_id: cat.id.clone(),
                is_correct: false,
                corrected_word: Some("ullundu".into()),
                notes: None,
                verified_by: "user".into(),
            })
            .await
            .unwrap();

        let stats = session.stats().await.unwrap();
        assert_eq!(stats.overall.total, 2);
        assert_eq!(stats.for_language(LanguageCode::Wo).verified, 1);
        assert_eq!(stats.for_language(LanguageCode::Ff).corrected, 1);

        let export = session.export().await.unwrap();
        assert_eq!(export.translations.len(), 2);
        assert_eq!(export.verifications.len(), 2);
        assert_eq!(export.translations[1].target_word, "ullundu");
    }

    #[tokio::test]
    async fn mirrored_translation_is_linked() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/translations"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 11})))
            .expect(1)
            .mount(&server)
            .await;

        let session = session(enabled_mirror(&server));
        let t = session.present("water", LanguageCode::Wo, None).await.unwrap();
        assert_eq!(t.remote_id.as_deref(), Some("11"));

        let stored = session.store().find_translation(&t.id).await.unwrap().unwrap();
        assert_eq!(stored.remote_id.as_deref(), Some("11"));
        assert_eq!(stored.status, TranslationStatus::Pending);
    }

    #[tokio::test]
    async fn mirror_outage_keeps_local_copy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let session = session(enabled_mirror(&server));
        let t = session.present("water", LanguageCode::Wo, None).await.unwrap();
        assert_eq!(t.target_word, "ndox");
        assert!(t.remote_id.is_none());
        assert_eq!(session.store().list_translations().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remote_sourced_translation_is_not_recreated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translations/search/wo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 5, "english_word": "water", "translated_word": "ndox"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 99})))
            .expect(0)
            .mount(&server)
            .await;

        let session = session(enabled_mirror(&server));
        let t = session.present("water", LanguageCode::Wo, None).await.unwrap();
        assert_eq!(t.id, "5");
        assert_eq!(t.remote_id.as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn repeated_remote_hit_is_saved_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translations/search/mnk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 7, "english_word": "hello", "translated_word": "salaam", "status": "pending"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 99})))
            .expect(0)
            .mount(&server)
            .await;

        let session = session(enabled_mirror(&server));
        let first = session.present("hello", LanguageCode::Mnk, None).await.unwrap();
        let second = session.present("hello", LanguageCode::Mnk, None).await.unwrap();
        assert_eq!(first.id, "7");
        assert_eq!(second.id, first.id);
        assert_eq!(second.target_word, "salaam");

        for t in [&first, &second] {
            session
                .submit_verdict(VerdictRequest {
                    translation_id: t.id.clone(),
                    is_correct: true,
                    corrected_word: None,
                    notes: None,
                    verified_by: "user".into(),
                })
                .await
                .unwrap();
        }

        let stored = session.store().list_translations().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, TranslationStatus::Verified);

        let stats = session.stats().await.unwrap();
        assert_eq!(stats.overall.total, 1);
        assert_eq!(stats.overall.pending, 0);
        assert_eq!(session.store().list_verifications().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn imports_csv_rows() {
        let session = session(RemoteMirror::disabled());
        let count = session
            .import_csv("english,wolof\nwater,ndox\nfire,safara,nature\n", LanguageCode::Wo)
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(session.stats().await.unwrap().for_language(LanguageCode::Wo).pending, 2);
    }

    #[tokio::test]
    async fn batch_presents_in_order() {
        let session = session(RemoteMirror::disabled());
        let words = vec!["water".to_string(), "stone".to_string()];

        let batch = session.present_batch(&words, LanguageCode::Wo, Some("nature")).await.unwrap();
        assert_eq!(batch[1].target_word, "[WO] stone");
        assert_eq!(session.store().list_translations().await.unwrap(), batch);
    }

    #[test]
    fn dataset_stats_cover_target_languages() {
        let session = session(RemoteMirror::disabled());
        let stats: Vec<_> = session
            .dataset_stats()
            .into_iter()
            .map(|(code, count)| (code, count.unwrap()))
            .collect();
        assert_eq!(
            stats,
            [
                (LanguageCode::Mnk, 0),
                (LanguageCode::Wo, 1),
                (LanguageCode::Dyo, 0),
                (LanguageCode::Ff, 0)
            ]
        );
    }
}
