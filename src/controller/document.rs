use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::backend::types::is_same_language_error;
use crate::backend::{DocumentOutcome, DocumentUpload};
use crate::downloads::Blob;
use crate::error::{ClientError, ClientResult};
use crate::view::{ElementId, ToastKind, View, ViewCommand};
use super::TranslatorController;

pub const STATUS_UPLOADING: &str = "Uploading document...";
pub const STATUS_DOCUMENT_DONE: &str = "Document translated";
pub const STATUS_DOCUMENT_FAILED: &str = "Document translation failed";
pub const STATUS_SAME_LANGUAGE: &str = "Document already in target language";
pub const DOCUMENT_SUCCESS_TOAST: &str = "Document translated successfully";
pub const READ_FAILED_TOAST: &str = "Could not read the selected file";

const DOWNLOAD_PREFIX: &str = "translated_";
const PROGRESS_SENT: u8 = 30;
const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// A file the page announced: metadata only, the bytes stay in the browser
/// until they are asked for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileInfo {
    /// Page-local handle used to fetch the content.
    pub id: u64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
    pub size: u64,
}

/// A file picked in the browser or dropped on the drop zone.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Where the content of an announced file is fetched from.
#[async_trait]
pub trait FileSource: Send + Sync {
    async fn read_file(&self, file: &FileInfo) -> ClientResult<Vec<u8>>;
}

pub fn download_name(original: &str) -> String {
    format!("{}{}", DOWNLOAD_PREFIX, original)
}

/// `10MB`, `512KB`, `100 bytes`: the largest unit that shows the limit exactly,
/// falling back to one decimal place of MB.
pub fn format_limit(bytes: u64) -> String {
    if bytes >= MIB {
        if bytes % MIB == 0 {
            format!("{}MB", bytes / MIB)
        } else {
            format!("{:.1}MB", bytes as f64 / MIB as f64)
        }
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}

fn check_size(size: u64, limit: usize) -> ClientResult<()> {
    let limit = limit as u64;
    if size > limit {
        return Err(ClientError::FileTooLarge { size, limit });
    }
    Ok(())
}

impl TranslatorController {
    pub fn set_drop_highlight(&self, highlighted: bool) {
        self.view.apply(ViewCommand::SetHighlight {
            element: ElementId::DropZone,
            highlighted,
        });
    }

    pub fn browse_for_file(&self) {
        self.view.apply(ViewCommand::OpenFilePicker);
    }

    /// The page announced a file. Oversized files are rejected before any of
    /// their content is transferred.
    pub async fn on_file_chosen(&self, file: FileInfo) {
        if let Err(e) = check_size(file.size, self.config.max_upload_bytes) {
            self.reject_oversized(&file.name, &e);
            return;
        }

        match self.files.read_file(&file).await {
            Ok(bytes) => {
                self.translate_document(SelectedFile {
                    name: file.name,
                    content_type: file.content_type.filter(|t| !t.is_empty()),
                    bytes,
                })
                .await
            }
            Err(e) => {
                error!("Could not read {}: {}", file.name, e);
                self.toast(ToastKind::Error, READ_FAILED_TOAST);
            }
        }
    }

    fn reject_oversized(&self, name: &str, reason: &ClientError) {
        warn!("Rejected {}: {}", name, reason);
        self.toast(
            ToastKind::Error,
            &format!(
                "File too large. Maximum size is {}.",
                format_limit(self.config.max_upload_bytes as u64)
            ),
        );
    }

    /// Upload `file` for translation and offer the result as a download.
    pub async fn translate_document(&self, file: SelectedFile) {
        if let Err(e) = check_size(file.bytes.len() as u64, self.config.max_upload_bytes) {
            self.reject_oversized(&file.name, &e);
            return;
        }

        let target_lang = self.form.read().await.target_lang.clone();
        let original_name = file.name.clone();

        self.view.set_visible(ElementId::LoadingOverlay, true);
        self.set_progress(0);
        self.view.set_status(STATUS_UPLOADING);

        let upload = DocumentUpload {
            file_name: file.name,
            content_type: file.content_type,
            bytes: file.bytes,
            target_lang,
        };
        self.set_progress(PROGRESS_SENT);
        let result = self.backend.translate_document(upload).await;
        self.set_progress(100);

        match result {
            Ok(DocumentOutcome::File { bytes, content_type }) => {
                let filename = download_name(&original_name);
                let (id, url) = self.downloads.create(Blob {
                    bytes,
                    content_type,
                    filename: filename.clone(),
                });
                self.track_object_url(id);
                self.view.apply(ViewCommand::Download { url, filename });
                info!("Document {} translated", original_name);
                self.view.set_status(STATUS_DOCUMENT_DONE);
                self.toast(ToastKind::Success, DOCUMENT_SUCCESS_TOAST);
            }
            Ok(DocumentOutcome::Error { error }) if is_same_language_error(&error) => {
                info!("Document {} already in target language", original_name);
                self.view.set_status(STATUS_SAME_LANGUAGE);
                self.toast(ToastKind::Info, &error);
            }
            Ok(DocumentOutcome::Error { error }) => {
                error!("Document translation failed: {}", error);
                self.view.set_status(STATUS_DOCUMENT_FAILED);
                self.toast(ToastKind::Error, &error);
            }
            Err(e) => {
                error!("Document upload failed: {}", e);
                self.view.set_status(STATUS_DOCUMENT_FAILED);
                self.toast(ToastKind::Error, &e.to_string());
            }
        }

        self.view.set_visible(ElementId::LoadingOverlay, false);
        self.set_progress(0);
    }

    fn set_progress(&self, percent: u8) {
        self.view.apply(ViewCommand::SetProgress { percent });
    }

    pub(crate) fn toast(&self, kind: ToastKind, message: &str) {
        self.view.apply(ViewCommand::Toast {
            kind,
            message: message.to_string(),
            duration_ms: self.config.toast_ms,
        });
    }
}
