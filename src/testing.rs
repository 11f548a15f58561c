//! In-memory doubles for driving a controller in unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

use crate::backend::{DocumentOutcome, DocumentUpload, TextTranslation, TranslationBackend};
use crate::config::ControllerConfig;
use crate::controller::{Clipboard, FileInfo, FileSource, TranslatorController};
use crate::downloads::ObjectUrlRegistry;
use crate::error::{ClientError, ClientResult};
use crate::preferences::PreferenceStore;
use crate::view::{ElementId, ToastKind, View, ViewCommand};

/// Let spawned tasks run to their next await point.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[derive(Default)]
pub struct RecordingView {
    commands: Mutex<Vec<ViewCommand>>,
}

impl View for RecordingView {
    fn apply(&self, command: ViewCommand) {
        self.commands.lock().unwrap().push(command);
    }
}

impl RecordingView {
    pub fn commands(&self) -> Vec<ViewCommand> {
        self.commands.lock().unwrap().clone()
    }

    fn last<T>(&self, pick: impl Fn(&ViewCommand) -> Option<T>) -> Option<T> {
        self.commands().iter().rev().find_map(pick)
    }

    pub fn text(&self, el: ElementId) -> Option<String> {
        self.last(|c| match c {
            ViewCommand::SetText { element, text } if *element == el => Some(text.clone()),
            _ => None,
        })
    }

    pub fn value(&self, el: ElementId) -> Option<String> {
        self.last(|c| match c {
            ViewCommand::SetValue { element, value } if *element == el => Some(value.clone()),
            _ => None,
        })
    }

    pub fn visible(&self, el: ElementId) -> Option<bool> {
        self.last(|c| match c {
            ViewCommand::SetVisible { element, visible } if *element == el => Some(*visible),
            _ => None,
        })
    }

    pub fn selected(&self, el: ElementId) -> Option<bool> {
        self.last(|c| match c {
            ViewCommand::SetSelected { element, selected } if *element == el => Some(*selected),
            _ => None,
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                ViewCommand::Alert { message } => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn toasts(&self) -> Vec<(ToastKind, String)> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                ViewCommand::Toast { kind, message, .. } => Some((kind, message)),
                _ => None,
            })
            .collect()
    }

    pub fn downloads(&self) -> Vec<(String, String)> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                ViewCommand::Download { url, filename } => Some((url, filename)),
                _ => None,
            })
            .collect()
    }

    pub fn progress_history(&self) -> Vec<u8> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                ViewCommand::SetProgress { percent } => Some(percent),
                _ => None,
            })
            .collect()
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    contents: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl FakeClipboard {
    pub fn contents(&self) -> Vec<String> {
        self.contents.lock().unwrap().clone()
    }

    pub fn fail_writes(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> ClientResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClientError::Clipboard("permission denied".to_string()));
        }
        self.contents.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Files the page "holds", keyed by their page-local id.
#[derive(Default)]
pub struct FakeFiles {
    contents: Mutex<HashMap<u64, Vec<u8>>>,
    reads: Mutex<Vec<u64>>,
}

impl FakeFiles {
    pub fn add(&self, id: u64, bytes: &[u8]) {
        self.contents.lock().unwrap().insert(id, bytes.to_vec());
    }

    pub fn reads(&self) -> Vec<u64> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSource for FakeFiles {
    async fn read_file(&self, file: &FileInfo) -> ClientResult<Vec<u8>> {
        self.reads.lock().unwrap().push(file.id);
        self.contents
            .lock()
            .unwrap()
            .get(&file.id)
            .cloned()
            .ok_or_else(|| ClientError::Page(format!("file {} is gone", file.id)))
    }
}

enum TextFailure {
    Backend(String),
    Transport(String),
}

/// Echoes `[LANG] text` for text and `TRANSLATED:LANG` for documents.
#[derive(Default)]
pub struct MockBackend {
    text_requests: Mutex<Vec<(String, String)>>,
    text_failure: Mutex<Option<TextFailure>>,
    text_delays: Mutex<HashMap<String, Duration>>,
    uploads: Mutex<Vec<(String, Vec<u8>)>>,
    document_error: Mutex<Option<String>>,
}

impl MockBackend {
    pub fn text_requests(&self) -> Vec<(String, String)> {
        self.text_requests.lock().unwrap().clone()
    }

    pub fn text_calls(&self) -> usize {
        self.text_requests.lock().unwrap().len()
    }

    pub fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn document_calls(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn fail_text_with(&self, error: &str) {
        *self.text_failure.lock().unwrap() = Some(TextFailure::Backend(error.to_string()));
    }

    pub fn fail_text_transport(&self, error: &str) {
        *self.text_failure.lock().unwrap() = Some(TextFailure::Transport(error.to_string()));
    }

    pub fn delay_text(&self, text: &str, delay: Duration) {
        self.text_delays.lock().unwrap().insert(text.to_string(), delay);
    }

    pub fn document_error(&self, error: &str) {
        *self.document_error.lock().unwrap() = Some(error.to_string());
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate_text(&self, text: &str, target_lang: &str) -> ClientResult<TextTranslation> {
        self.text_requests
            .lock()
            .unwrap()
            .push((text.to_string(), target_lang.to_string()));

        let delay = self.text_delays.lock().unwrap().get(text).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match &*self.text_failure.lock().unwrap() {
            Some(TextFailure::Backend(msg)) => return Err(ClientError::Backend(msg.clone())),
            Some(TextFailure::Transport(msg)) => return Err(ClientError::InvalidResponse(msg.clone())),
            None => {}
        }

        Ok(TextTranslation {
            translated_text: format!("[{}] {}", target_lang, text),
            detected_language: "DE".to_string(),
        })
    }

    async fn translate_document(&self, upload: DocumentUpload) -> ClientResult<DocumentOutcome> {
        self.uploads
            .lock()
            .unwrap()
            .push((upload.file_name.clone(), upload.bytes.clone()));

        if let Some(error) = self.document_error.lock().unwrap().clone() {
            return Ok(DocumentOutcome::Error { error });
        }
        Ok(DocumentOutcome::File {
            bytes: format!("TRANSLATED:{}", upload.target_lang).into_bytes(),
            content_type: "text/plain".to_string(),
        })
    }

    async fn health_check(&self) -> ClientResult<bool> {
        Ok(true)
    }
}

/// A controller wired to recording doubles and a temporary preference file.
pub struct Harness {
    pub controller: TranslatorController,
    pub view: Arc<RecordingView>,
    pub clipboard: Arc<FakeClipboard>,
    pub files: Arc<FakeFiles>,
    pub backend: Arc<MockBackend>,
    pub prefs: Arc<PreferenceStore>,
    pub downloads: Arc<ObjectUrlRegistry>,
    dir: Arc<TempDir>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    pub fn with_config(config: ControllerConfig) -> Self {
        Self::in_dir(Arc::new(TempDir::new().unwrap()), config)
    }

    fn in_dir(dir: Arc<TempDir>, config: ControllerConfig) -> Self {
        let view = Arc::new(RecordingView::default());
        let clipboard = Arc::new(FakeClipboard::default());
        let files = Arc::new(FakeFiles::default());
        let backend = Arc::new(MockBackend::default());
        let prefs = Arc::new(PreferenceStore::open(dir.path().join("prefs.json")));
        let downloads = Arc::new(ObjectUrlRegistry::new());

        let controller = TranslatorController::new(
            config,
            backend.clone(),
            view.clone(),
            clipboard.clone(),
            files.clone(),
            prefs.clone(),
            downloads.clone(),
        );

        Self {
            controller,
            view,
            clipboard,
            files,
            backend,
            prefs,
            downloads,
            dir,
        }
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.dir.path().join("prefs.json")
    }

    /// A fresh page sharing this one's preference file.
    pub fn reconnect(&self) -> Self {
        Self::in_dir(self.dir.clone(), ControllerConfig::default())
    }
}
