use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::Response,
};
use axum::extract::ws::WebSocket;
use futures_util::{SinkExt, Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::controller::{EventKind, TranslatorController, UiEvent};
use crate::view::ws_view::WebSocketSend;
use crate::view::WsView;
use super::state::AppState;

/// axum's default frame ceiling; never go below it.
const DEFAULT_MESSAGE_BYTES: usize = 16 << 20;
/// Room for the JSON envelope around a base64 file body.
const ENVELOPE_BYTES: usize = 64 * 1024;

/// Largest message a page may send: a base64-encoded file at the upload
/// limit plus its envelope.
pub fn max_message_bytes(max_upload_bytes: usize) -> usize {
    let encoded = max_upload_bytes.div_ceil(3) * 4;
    (encoded + ENVELOPE_BYTES).max(DEFAULT_MESSAGE_BYTES)
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    let limit = max_message_bytes(state.config.controller.max_upload_bytes);
    ws.max_message_size(limit)
        .max_frame_size(limit)
        .on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // View commands are produced from many tasks; one writer owns the sink.
    let writer = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(payload)).await {
                error!("Failed to send view command: {}", e);
                break;
            }
        }
    });

    run_page(state, receiver, tx).await;
    writer.abort();
}

/// Drive one page until its socket closes: events in, view commands out
/// through `outgoing`.
pub async fn run_page<S>(state: AppState, mut incoming: S, outgoing: WebSocketSend)
where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    let page_uid = state.generate_page_uid();
    info!("New page connection: {}", page_uid);

    let view = Arc::new(WsView::new(outgoing));
    let controller = TranslatorController::new(
        state.config.controller.clone(),
        state.backend.clone(),
        view.clone(),
        view.clone(),
        view.clone(),
        state.preferences.clone(),
        state.downloads.clone(),
    );
    state.pages.insert(page_uid.clone(), controller.clone());
    controller.init().await;

    while let Some(msg) = incoming.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<UiEvent>(&text) {
                Ok(event) if event.event == EventKind::Reply => match event.into_reply() {
                    Some((request, reply)) => view.resolve(request, reply),
                    None => warn!("Reply without request id from {}", page_uid),
                },
                Ok(event) => {
                    controller.dispatch(event).await;
                }
                Err(e) => warn!("Malformed event from {}: {}", page_uid, e),
            },
            Ok(Message::Close(_)) => {
                info!("Page {} disconnected", page_uid);
                break;
            }
            Err(e) => {
                error!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    // Cleanup
    view.close();
    controller.shutdown();
    state.pages.remove(&page_uid);
    debug!("Cleaned up page {}", page_uid);
}
