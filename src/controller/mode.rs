use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::view::{ElementId, View};
use super::TranslatorController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Text,
    Document,
}

impl Mode {
    pub fn panel(&self) -> ElementId {
        match self {
            Mode::Text => ElementId::TextPanel,
            Mode::Document => ElementId::DocumentPanel,
        }
    }

    pub fn button(&self) -> ElementId {
        match self {
            Mode::Text => ElementId::TextModeButton,
            Mode::Document => ElementId::DocumentModeButton,
        }
    }

    pub fn other(&self) -> Mode {
        match self {
            Mode::Text => Mode::Document,
            Mode::Document => Mode::Text,
        }
    }
}

/// Render `mode`: its button selected and its panel shown, the other pair off.
pub fn render_mode(view: &dyn View, mode: Mode) {
    let hidden = mode.other();
    view.set_selected(mode.button(), true);
    view.set_selected(hidden.button(), false);
    view.set_visible(mode.panel(), true);
    view.set_visible(hidden.panel(), false);
}

impl TranslatorController {
    pub async fn mode(&self) -> Mode {
        *self.mode.read().await
    }

    pub async fn switch_mode(&self, mode: Mode) {
        *self.mode.write().await = mode;
        debug!("Switched to {:?} mode", mode);
        render_mode(self.view.as_ref(), mode);
    }
}
