use async_trait::async_trait;

use crate::error::ClientResult;
use super::types::{DocumentOutcome, DocumentUpload, TextTranslation};

/// The translation service as seen by the controller.
///
/// Translation, language detection and document handling all happen behind
/// this seam; the controller only renders what comes back.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text` into `target_lang`.
    ///
    /// # Returns
    /// The translated text with the detected source language, or
    /// `ClientError::Backend` carrying the backend's own error message.
    async fn translate_text(&self, text: &str, target_lang: &str) -> ClientResult<TextTranslation>;

    /// Upload a document for translation.
    ///
    /// Backend-reported failures come back as `Ok(DocumentOutcome::Error)`;
    /// only transport failures are `Err`.
    async fn translate_document(&self, upload: DocumentUpload) -> ClientResult<DocumentOutcome>;

    /// Whether the backend answers at all.
    async fn health_check(&self) -> ClientResult<bool>;
}
