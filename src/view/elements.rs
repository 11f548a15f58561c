use serde::{Deserialize, Serialize};
use std::fmt;

/// Elements of the page the controller reads events from or writes to.
/// Serialized as the element's DOM id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementId {
    SourceText,
    TargetLang,
    TranslatedText,
    DetectedLang,
    StatusText,
    CopyButton,
    XcopyButton,
    TextModeButton,
    DocumentModeButton,
    TextPanel,
    DocumentPanel,
    DropZone,
    FileInput,
    ProgressBar,
    LoadingOverlay,
    ToastContainer,
}

impl ElementId {
    /// Every element the controller expects to find at initialization.
    pub const REQUIRED: [ElementId; 16] = [
        ElementId::SourceText,
        ElementId::TargetLang,
        ElementId::TranslatedText,
        ElementId::DetectedLang,
        ElementId::StatusText,
        ElementId::CopyButton,
        ElementId::XcopyButton,
        ElementId::TextModeButton,
        ElementId::DocumentModeButton,
        ElementId::TextPanel,
        ElementId::DocumentPanel,
        ElementId::DropZone,
        ElementId::FileInput,
        ElementId::ProgressBar,
        ElementId::LoadingOverlay,
        ElementId::ToastContainer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::SourceText => "sourceText",
            ElementId::TargetLang => "targetLang",
            ElementId::TranslatedText => "translatedText",
            ElementId::DetectedLang => "detectedLang",
            ElementId::StatusText => "statusText",
            ElementId::CopyButton => "copyButton",
            ElementId::XcopyButton => "xcopyButton",
            ElementId::TextModeButton => "textModeButton",
            ElementId::DocumentModeButton => "documentModeButton",
            ElementId::TextPanel => "textPanel",
            ElementId::DocumentPanel => "documentPanel",
            ElementId::DropZone => "dropZone",
            ElementId::FileInput => "fileInput",
            ElementId::ProgressBar => "progressBar",
            ElementId::LoadingOverlay => "loadingOverlay",
            ElementId::ToastContainer => "toastContainer",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
