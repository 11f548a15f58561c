use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::elements::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// One mutation of the page. Sent to the browser as
/// `{"type": "set-text", ...}` style messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ViewCommand {
    /// Replace an element's text content.
    SetText { element: ElementId, text: String },
    /// Replace a form control's value.
    SetValue { element: ElementId, value: String },
    SetVisible { element: ElementId, visible: bool },
    SetSelected { element: ElementId, selected: bool },
    SetHighlight { element: ElementId, highlighted: bool },
    SetProgress { percent: u8 },
    /// Blocking alert dialog.
    Alert { message: String },
    Toast {
        kind: ToastKind,
        message: String,
        duration_ms: u64,
    },
    /// Write `text` to the page's clipboard and reply with the outcome.
    WriteClipboard { request: Uuid, text: String },
    OpenFilePicker,
    /// Reply with the base64 content of a file the page announced.
    ReadFile { request: Uuid, file_id: u64 },
    /// Start a browser download of `url` saved as `filename`.
    Download { url: String, filename: String },
}
