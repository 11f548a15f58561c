pub mod types;
pub mod interface;
pub mod client;

pub use types::{DocumentOutcome, DocumentUpload, TextTranslation, TranslateTextRequest, TranslateTextResponse};
pub use interface::TranslationBackend;
pub use client::HttpBackend;
