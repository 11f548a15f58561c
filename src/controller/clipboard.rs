use async_trait::async_trait;
use tracing::{debug, error};

use crate::error::ClientResult;
use crate::view::{ElementId, View};
use super::TranslatorController;

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";
pub const COPY_FAILED_LABEL: &str = "Failed to copy";
pub const XCOPY_LABEL: &str = "XCopy";
pub const CLEANED_LABEL: &str = "Cleaned!";

/// Somewhere copied text can be written to.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> ClientResult<()>;
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(feature = "system-clipboard")]
pub use system::SystemClipboard;

#[cfg(feature = "system-clipboard")]
mod system {
    use async_trait::async_trait;

    use crate::error::{ClientError, ClientResult};
    use super::Clipboard;

    /// The OS clipboard, for embedding the controller outside a browser.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct SystemClipboard;

    #[async_trait]
    impl Clipboard for SystemClipboard {
        async fn write_text(&self, text: &str) -> ClientResult<()> {
            let text = text.to_string();
            tokio::task::spawn_blocking(move || cli_clipboard::set_contents(text).map_err(|e| e.to_string()))
                .await
                .map_err(|e| ClientError::Clipboard(e.to_string()))?
                .map_err(ClientError::Clipboard)
        }
    }
}

impl TranslatorController {
    /// Copy the translated text as-is.
    pub async fn copy_translation(&self) -> ClientResult<()> {
        let text = self.translated_text().await;

        let result = self.clipboard.write_text(&text).await;
        match &result {
            Ok(()) => {
                debug!("Copied {} chars", text.len());
                self.view.set_text(ElementId::CopyButton, COPIED_LABEL);
            }
            Err(e) => {
                error!("Failed to copy text: {}", e);
                self.view.set_text(ElementId::CopyButton, COPY_FAILED_LABEL);
            }
        }
        self.revert_label_later(ElementId::CopyButton, COPY_LABEL);
        result
    }

    /// Copy the translated text with its whitespace collapsed.
    pub async fn clean_copy_translation(&self) -> ClientResult<()> {
        let cleaned = normalize_whitespace(&self.translated_text().await);

        let result = self.clipboard.write_text(&cleaned).await;
        match &result {
            Ok(()) => {
                self.view.set_text(ElementId::XcopyButton, CLEANED_LABEL);
                self.revert_label_later(ElementId::XcopyButton, XCOPY_LABEL);
            }
            Err(e) => error!("Copy failed: {}", e),
        }
        result
    }

    fn revert_label_later(&self, button: ElementId, label: &'static str) {
        let view = self.view.clone();
        let delay = self.config.copy_feedback();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.set_text(button, label);
        });
    }
}
