pub mod error;
pub mod import;
pub mod language;
pub mod recorder;
pub mod resolver;
pub mod sample;
pub mod session;
pub mod word_source;

pub use error::{RecordError, ResolveError, SessionError};
pub use language::LanguageRegistry;
pub use recorder::{VerdictRequest, VerificationRecorder};
pub use resolver::TranslationResolver;
pub use session::VerificationSession;
pub use word_source::WordSource;
