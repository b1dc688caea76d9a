use bantaba_dictionary::LoadError;
use bantaba_store::StoreError;
use bantaba_types::LanguageCode;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Word list for {language} is unavailable: {source}")]
    Dataset {
        language: LanguageCode,
        #[source]
        source: LoadError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Failed to persist verdict: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Local storage failed: {0}")]
    Store(#[from] StoreError),
}
