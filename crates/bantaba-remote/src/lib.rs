mod client;
mod record;

pub use client::{Mirror, RemoteError, RemoteMirror};
pub use record::{RemoteTranslation, TranslationUpdate};
