use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::controller::clipboard::Clipboard;
use crate::controller::document::{FileInfo, FileSource};
use crate::error::{ClientError, ClientResult};
use super::commands::ViewCommand;
use super::replies::{PageReply, PendingReplies};
use super::View;

/// Outgoing half of a page connection.
pub type WebSocketSend = mpsc::UnboundedSender<String>;

/// How long a command that expects an answer waits for the page.
pub const PAGE_REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// A view that serializes every command onto the page's WebSocket.
///
/// Clipboard writes and file reads go through the same channel. The page
/// performs them with its own APIs and answers with a `reply` event.
#[derive(Clone)]
pub struct WsView {
    sender: WebSocketSend,
    replies: Arc<PendingReplies>,
}

impl WsView {
    pub fn new(sender: WebSocketSend) -> Self {
        Self {
            sender,
            replies: Arc::new(PendingReplies::new()),
        }
    }

    fn send(&self, command: &ViewCommand) -> Result<(), String> {
        let payload = serde_json::to_string(command).map_err(|e| e.to_string())?;
        self.sender.send(payload).map_err(|e| e.to_string())
    }

    /// Send the command built for a fresh request id and wait for the answer.
    async fn request(&self, build: impl FnOnce(Uuid) -> ViewCommand) -> ClientResult<PageReply> {
        let (id, rx) = self.replies.register();
        if let Err(e) = self.send(&build(id)) {
            self.replies.forget(&id);
            return Err(ClientError::Page(format!("page connection closed: {}", e)));
        }

        match tokio::time::timeout(PAGE_REPLY_TIMEOUT, rx).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(_)) => Err(ClientError::Page("page disconnected".to_string())),
            Err(_) => {
                self.replies.forget(&id);
                Err(ClientError::Page("page did not answer".to_string()))
            }
        }
    }

    /// Route a `reply` event to the request waiting for it.
    pub fn resolve(&self, request: Uuid, reply: PageReply) {
        if !self.replies.resolve(&request, reply) {
            warn!("Unexpected reply {}", request);
        }
    }

    /// Fail every request still waiting on the page.
    pub fn close(&self) {
        self.replies.close();
    }
}

impl View for WsView {
    fn apply(&self, command: ViewCommand) {
        if let Err(e) = self.send(&command) {
            error!("Failed to send view command: {}", e);
        }
    }
}

#[async_trait]
impl Clipboard for WsView {
    async fn write_text(&self, text: &str) -> ClientResult<()> {
        debug!("Forwarding {} chars to the page clipboard", text.len());
        let reply = self
            .request(|request| ViewCommand::WriteClipboard {
                request,
                text: text.to_string(),
            })
            .await
            .map_err(|e| ClientError::Clipboard(e.to_string()))?;

        if reply.ok {
            Ok(())
        } else {
            Err(ClientError::Clipboard(
                reply.error.unwrap_or_else(|| "write rejected".to_string()),
            ))
        }
    }
}

#[async_trait]
impl FileSource for WsView {
    async fn read_file(&self, file: &FileInfo) -> ClientResult<Vec<u8>> {
        let reply = self
            .request(|request| ViewCommand::ReadFile {
                request,
                file_id: file.id,
            })
            .await?;

        match (reply.ok, reply.value) {
            (true, Some(data)) => BASE64
                .decode(data.as_bytes())
                .map_err(|e| ClientError::Page(format!("undecodable file content: {}", e))),
            (_, _) => Err(ClientError::Page(
                reply.error.unwrap_or_else(|| "file could not be read".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ElementId;
    use serde_json::Value;

    fn answer_next(view: &WsView, msg: &str, ok: bool, value: Option<&str>, error: Option<&str>) {
        let value_json: Value = serde_json::from_str(msg).unwrap();
        let request: Uuid = serde_json::from_value(value_json["request"].clone()).unwrap();
        view.resolve(
            request,
            PageReply {
                ok,
                value: value.map(str::to_string),
                error: error.map(str::to_string),
            },
        );
    }

    #[tokio::test]
    async fn commands_are_sent_as_json_text() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let view = WsView::new(tx);

        view.set_status("Translating...");
        let msg = rx.recv().await.unwrap();
        let value: Value = serde_json::from_str(&msg).unwrap();
        assert_eq!(value["type"], "set-text");
        assert_eq!(value["element"], ElementId::StatusText.as_str());
    }

    #[tokio::test]
    async fn clipboard_fails_once_the_page_is_gone() {
        let (tx, rx) = mpsc::unbounded_channel();
        let view = WsView::new(tx);
        drop(rx);

        let err = view.write_text("hello").await.unwrap_err();
        assert!(matches!(err, ClientError::Clipboard(_)));
    }

    #[tokio::test]
    async fn clipboard_write_waits_for_the_page_answer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let view = WsView::new(tx);

        let page = view.clone();
        let answered = tokio::spawn(async move {
            let msg = rx.recv().await.unwrap();
            assert!(msg.contains("\"write-clipboard\""));
            answer_next(&page, &msg, false, None, Some("NotAllowedError"));
            rx
        });

        let err = view.write_text("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "Clipboard error: NotAllowedError");
        answered.await.unwrap();
    }

    #[tokio::test]
    async fn file_content_arrives_base64_encoded() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let view = WsView::new(tx);

        let page = view.clone();
        tokio::spawn(async move {
            let msg = rx.recv().await.unwrap();
            let value: Value = serde_json::from_str(&msg).unwrap();
            assert_eq!(value["type"], "read-file");
            assert_eq!(value["file_id"], 3);
            answer_next(&page, &msg, true, Some("aGVsbG8="), None);
            rx
        });

        let file = FileInfo {
            id: 3,
            name: "hello.txt".to_string(),
            content_type: None,
            size: 5,
        };
        assert_eq!(view.read_file(&file).await.unwrap(), b"hello".to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn silent_page_times_out() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let view = WsView::new(tx);

        let err = view.write_text("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "Clipboard error: Page error: page did not answer");
    }

    #[tokio::test]
    async fn closing_fails_waiting_requests() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let view = WsView::new(tx);

        let page = view.clone();
        tokio::spawn(async move {
            rx.recv().await.unwrap();
            page.close();
            rx
        });

        let file = FileInfo {
            id: 1,
            name: "a".to_string(),
            content_type: None,
            size: 1,
        };
        let err = view.read_file(&file).await.unwrap_err();
        assert!(matches!(err, ClientError::Page(_)));
    }
}
