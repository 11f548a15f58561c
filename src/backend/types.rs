use serde::{Deserialize, Serialize};

/// Body of `POST /translate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateTextRequest {
    pub text: String,
    pub target_lang: String,
}

/// Body returned by `POST /translate`.
///
/// The backend answers either `{success, translated_text, detected_language}`
/// or `{success: false, error}`, so everything but `success` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateTextResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A successful text translation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextTranslation {
    pub translated_text: String,
    pub detected_language: String,
}

/// A file about to be sent to `POST /translate-document`.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub target_lang: String,
}

/// JSON body the document endpoint uses to report failures.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// What the document endpoint sent back, classified by content type.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    File {
        bytes: Vec<u8>,
        content_type: String,
    },
    Error {
        error: String,
    },
}

const SAME_LANGUAGE_MARKER: &str = "same as target language";

/// The backend's way of saying there was nothing to translate.
pub fn is_same_language_error(message: &str) -> bool {
    message.contains(SAME_LANGUAGE_MARKER)
}
