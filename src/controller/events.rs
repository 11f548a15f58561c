use serde::Deserialize;
use std::collections::HashMap;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::view::{ElementId, PageReply};
use super::document::FileInfo;
use super::mode::Mode;
use super::TranslatorController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Ready,
    Input,
    Change,
    Click,
    DragOver,
    DragLeave,
    Drop,
    /// The page answering a command that asked for a reply.
    Reply,
    #[serde(other)]
    Unknown,
}

/// One DOM event forwarded by the page.
#[derive(Debug, Clone, Deserialize)]
pub struct UiEvent {
    /// DOM id of the element the event fired on. Absent for `ready` and `reply`.
    #[serde(default)]
    pub target: Option<String>,
    pub event: EventKind,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub file: Option<FileInfo>,
    /// Element ids present on the page; sent with `ready`.
    #[serde(default)]
    pub elements: Option<Vec<String>>,
    /// Command a `reply` answers.
    #[serde(default)]
    pub request: Option<Uuid>,
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UiEvent {
    /// The command id and answer carried by a `reply` event.
    pub fn into_reply(self) -> Option<(Uuid, PageReply)> {
        if self.event != EventKind::Reply {
            return None;
        }
        let request = self.request?;
        Some((
            request,
            PageReply {
                ok: self.ok.unwrap_or(false),
                value: self.value,
                error: self.error,
            },
        ))
    }
}

/// What a routed event asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SourceEdited,
    TargetLanguageChanged,
    Copy,
    CleanCopy,
    SwitchMode(Mode),
    BrowseFile,
    DragHighlight(bool),
    FileChosen,
}

/// `(element, event kind) -> action`, built once per controller.
#[derive(Debug, Clone)]
pub struct EventTable {
    routes: HashMap<(ElementId, EventKind), Action>,
}

impl EventTable {
    pub fn new() -> Self {
        let routes = HashMap::from([
            ((ElementId::SourceText, EventKind::Input), Action::SourceEdited),
            ((ElementId::TargetLang, EventKind::Change), Action::TargetLanguageChanged),
            ((ElementId::CopyButton, EventKind::Click), Action::Copy),
            ((ElementId::XcopyButton, EventKind::Click), Action::CleanCopy),
            ((ElementId::TextModeButton, EventKind::Click), Action::SwitchMode(Mode::Text)),
            ((ElementId::DocumentModeButton, EventKind::Click), Action::SwitchMode(Mode::Document)),
            ((ElementId::DropZone, EventKind::Click), Action::BrowseFile),
            ((ElementId::DropZone, EventKind::DragOver), Action::DragHighlight(true)),
            ((ElementId::DropZone, EventKind::DragLeave), Action::DragHighlight(false)),
            ((ElementId::DropZone, EventKind::Drop), Action::FileChosen),
            ((ElementId::FileInput, EventKind::Change), Action::FileChosen),
        ]);
        Self { routes }
    }

    pub fn route(&self, element: ElementId, kind: EventKind) -> Option<Action> {
        self.routes.get(&(element, kind)).copied()
    }
}

impl Default for EventTable {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_element(id: &str) -> Option<ElementId> {
    serde_json::from_value(serde_json::Value::String(id.to_string())).ok()
}

impl TranslatorController {
    /// Route one page event.
    ///
    /// Quick actions run inline so form updates keep their arrival order.
    /// Network-bound actions are spawned and their handle returned.
    pub async fn dispatch(&self, event: UiEvent) -> Option<JoinHandle<()>> {
        if event.event == EventKind::Ready {
            self.check_elements(event.elements.as_deref().unwrap_or_default());
            return None;
        }

        let Some(target) = event.target.as_deref() else {
            warn!("Event {:?} without target", event.event);
            return None;
        };
        let Some(element) = parse_element(target) else {
            warn!("Unknown element: {}", target);
            return None;
        };
        let Some(action) = self.events.route(element, event.event) else {
            warn!("Unhandled event: {} {:?}", target, event.event);
            return None;
        };

        debug!("{} {:?} -> {:?}", element, event.event, action);

        match action {
            Action::SourceEdited => {
                self.on_source_input(event.value.unwrap_or_default()).await;
                None
            }
            Action::TargetLanguageChanged => {
                let controller = self.clone();
                let lang = event.value.unwrap_or_default();
                Some(tokio::spawn(async move {
                    controller.on_target_language_change(lang).await;
                }))
            }
            Action::Copy => {
                let controller = self.clone();
                Some(tokio::spawn(async move {
                    let _ = controller.copy_translation().await;
                }))
            }
            Action::CleanCopy => {
                let controller = self.clone();
                Some(tokio::spawn(async move {
                    let _ = controller.clean_copy_translation().await;
                }))
            }
            Action::SwitchMode(mode) => {
                self.switch_mode(mode).await;
                None
            }
            Action::BrowseFile => {
                self.browse_for_file();
                None
            }
            Action::DragHighlight(on) => {
                self.set_drop_highlight(on);
                None
            }
            Action::FileChosen => {
                if element == ElementId::DropZone {
                    self.set_drop_highlight(false);
                }
                let Some(file) = event.file else {
                    debug!("No file selected");
                    return None;
                };
                let controller = self.clone();
                Some(tokio::spawn(async move {
                    controller.on_file_chosen(file).await;
                }))
            }
        }
    }

    /// Log every required element the page did not report.
    pub fn check_elements(&self, present: &[String]) -> Vec<ElementId> {
        let missing: Vec<ElementId> = ElementId::REQUIRED
            .into_iter()
            .filter(|id| !present.iter().any(|p| p == id.as_str()))
            .collect();
        for id in &missing {
            error!("{} not found!", id);
        }
        missing
    }
}
