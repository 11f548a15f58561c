pub mod elements;
pub mod commands;
pub mod replies;
pub mod ws_view;

pub use elements::ElementId;
pub use commands::{ToastKind, ViewCommand};
pub use replies::{PageReply, PendingReplies};
pub use ws_view::WsView;

/// The page as the controller sees it.
///
/// Writes are fire-and-forget: a view that can no longer reach the page logs
/// and drops the command.
pub trait View: Send + Sync {
    fn apply(&self, command: ViewCommand);

    fn set_text(&self, element: ElementId, text: &str) {
        self.apply(ViewCommand::SetText {
            element,
            text: text.to_string(),
        });
    }

    fn set_value(&self, element: ElementId, value: &str) {
        self.apply(ViewCommand::SetValue {
            element,
            value: value.to_string(),
        });
    }

    fn set_visible(&self, element: ElementId, visible: bool) {
        self.apply(ViewCommand::SetVisible { element, visible });
    }

    fn set_selected(&self, element: ElementId, selected: bool) {
        self.apply(ViewCommand::SetSelected { element, selected });
    }

    fn set_status(&self, text: &str) {
        self.set_text(ElementId::StatusText, text);
    }

    fn alert(&self, message: &str) {
        self.apply(ViewCommand::Alert {
            message: message.to_string(),
        });
    }
}
