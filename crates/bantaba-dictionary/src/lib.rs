mod library;
mod loader;
mod types;

pub use library::WordLists;
pub use loader::WordListLoader;
pub use types::{LoadError, MatchTier, WordEntry, WordList};
