mod kv;
mod stats;
mod store;

pub use kv::{FileKv, KeyValueStore, MemoryKv};
pub use stats::{LanguageStats, StatusCounts, StoreStats};
pub use store::{LocalStore, StoreError, TRANSLATIONS_KEY, VERIFICATIONS_KEY};
