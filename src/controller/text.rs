use std::sync::atomic::Ordering;
use tracing::{debug, error, warn};

use crate::view::{ElementId, View};
use super::TranslatorController;

pub const STATUS_IDLE: &str = "Type or paste text to translate...";
pub const STATUS_WAITING: &str = "Waiting for you to stop typing...";
pub const STATUS_TRANSLATING: &str = "Translating...";
pub const STATUS_COMPLETE: &str = "Translation complete";
pub const STATUS_FAILED: &str = "Translation failed";
pub const DETECTED_NONE: &str = "Detected language: -";

pub fn detected_label(code: &str) -> String {
    format!("Detected language: {}", code)
}

impl TranslatorController {
    /// The source text changed. Empty input clears the output right away;
    /// anything else (re)arms the debounce timer.
    pub async fn on_source_input(&self, text: String) {
        let is_empty = text.trim().is_empty();
        self.form.write().await.source_text = text;

        if is_empty {
            self.debouncer.cancel();
            self.clear_output().await;
            return;
        }

        self.view.set_status(STATUS_WAITING);
        let controller = self.clone();
        self.debouncer.schedule(async move {
            controller.translate_current().await;
        });
    }

    /// The target language changed: remember it and translate right away.
    pub async fn on_target_language_change(&self, lang: String) {
        if let Err(e) = self.preferences.set_preferred_language(&lang) {
            warn!("Could not persist language preference: {}", e);
        }
        self.form.write().await.target_lang = lang;
        self.debouncer.cancel();
        self.translate_current().await;
    }

    /// Translate the current trimmed source text into the selected language.
    ///
    /// Only the most recently issued request may render its outcome.
    pub async fn translate_current(&self) {
        let (text, target_lang) = {
            let form = self.form.read().await;
            (form.source_text.trim().to_string(), form.target_lang.clone())
        };

        if text.is_empty() {
            self.clear_output().await;
            return;
        }

        let sequence = self.next_text_sequence();
        self.view.set_status(STATUS_TRANSLATING);

        let result = self.backend.translate_text(&text, &target_lang).await;
        if !self.is_latest_text_request(sequence) {
            debug!("Discarding stale translation #{}", sequence);
            return;
        }

        match result {
            Ok(translation) => {
                self.set_translated_text(&translation.translated_text).await;
                self.view.set_text(
                    ElementId::DetectedLang,
                    &detected_label(&translation.detected_language),
                );
                self.view.set_status(STATUS_COMPLETE);
            }
            Err(e) => {
                error!("Translation #{} failed: {}", sequence, e);
                self.view.set_status(STATUS_FAILED);
                let message = if e.is_transport() {
                    format!("Error: {}", e)
                } else {
                    format!("Translation failed: {}", e)
                };
                self.view.alert(&message);
            }
        }
    }

    async fn clear_output(&self) {
        // Invalidate anything still in flight.
        self.next_text_sequence();
        self.set_translated_text("").await;
        self.view.set_text(ElementId::DetectedLang, DETECTED_NONE);
        self.view.set_status(STATUS_IDLE);
    }

    pub(crate) async fn set_translated_text(&self, text: &str) {
        self.form.write().await.translated_text = text.to_string();
        self.view.set_value(ElementId::TranslatedText, text);
    }

    pub async fn translated_text(&self) -> String {
        self.form.read().await.translated_text.clone()
    }

    fn next_text_sequence(&self) -> u64 {
        self.text_sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest_text_request(&self, sequence: u64) -> bool {
        self.text_sequence.load(Ordering::SeqCst) == sequence
    }
}
