// Abacus Engine — Chat Session & Connection Lifecycle
//
// One ChatSession per mounted chat view: an opaque session id, an
// append-only message list, the image-overlay slot, and a connection that
// lives exactly as long as the session. Activation opens a single
// WebSocket to the configured endpoint; release tears it down
// unconditionally. No pooling, no reconnection, no backoff — a session
// whose link drops is permanently done sending, and a remounted view gets
// a fresh session.
//
// Transport failure is silent from the message list's perspective: it is
// logged and the link state flips to Closed, nothing more.

use log::{debug, error, info, warn};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tauri::Emitter;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};

use crate::engine::classify;
use crate::engine::types::{ChatMessage, LinkState, MessagePayload, Sender};

// ── Session ────────────────────────────────────────────────────────────────

pub struct ChatSession {
    /// Generated once per session, stamped on every outbound frame.
    pub session_id: String,
    state: Mutex<LinkState>,
    messages: Mutex<Vec<ChatMessage>>,
    /// Index of the message whose image is currently shown full-viewport.
    overlay: Mutex<Option<usize>>,
    outbound: Mutex<Option<mpsc::UnboundedSender<String>>>,
}

/// Result of one composer send. Not an error type: a gated send is a
/// no-op by contract, and the page keeps the input buffer untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SendOutcome {
    Sent { message: ChatMessage },
    EmptyInput,
    NotConnected,
}

impl ChatSession {
    pub fn new() -> Self {
        ChatSession {
            session_id: uuid::Uuid::new_v4().to_string(),
            state: Mutex::new(LinkState::Idle),
            messages: Mutex::new(Vec::new()),
            overlay: Mutex::new(None),
            outbound: Mutex::new(None),
        }
    }

    pub fn link_state(&self) -> LinkState {
        *self.state.lock()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().clone()
    }

    /// Release the session: the link state becomes Closed (terminal) and the
    /// outbound channel is dropped, which ends the link task and closes the
    /// socket. Safe to call on any exit path, any number of times.
    pub fn release(&self) {
        *self.state.lock() = LinkState::Closed;
        self.outbound.lock().take();
    }

    /// Send one user message. Gated on non-empty trimmed input and an Open
    /// link; a gated send transmits nothing and appends nothing. On success
    /// the message is appended optimistically — before any backend reply —
    /// and returned so the page can render it immediately.
    pub fn send(&self, input: &str) -> SendOutcome {
        if input.trim().is_empty() {
            return SendOutcome::EmptyInput;
        }
        if self.link_state() != LinkState::Open {
            return SendOutcome::NotConnected;
        }
        let frame = json!({
            "text": input,
            "sender": "user",
            "sessionId": self.session_id,
        })
        .to_string();
        {
            let outbound = self.outbound.lock();
            let delivered = match outbound.as_ref() {
                Some(tx) => tx.send(frame).is_ok(),
                None => false,
            };
            // The link may have torn down between the state check and here;
            // the frame is dropped silently, and nothing is appended.
            if !delivered {
                return SendOutcome::NotConnected;
            }
        }
        let message = ChatMessage {
            sender: Sender::User,
            payload: MessagePayload::Text { text: input.to_string() },
            session_id: Some(self.session_id.clone()),
        };
        self.messages.lock().push(message.clone());
        SendOutcome::Sent { message }
    }

    /// Toggle the full-viewport image overlay. Clicking the message whose
    /// image is already shown (or anywhere outside an image) closes it;
    /// clicking an image message shows that image. At most one overlay
    /// exists at a time.
    pub fn toggle_overlay(&self, index: usize) -> Option<usize> {
        let is_image = matches!(
            self.messages.lock().get(index),
            Some(ChatMessage { payload: MessagePayload::Image { .. }, .. })
        );
        let mut overlay = self.overlay.lock();
        *overlay = match *overlay {
            Some(current) if current == index => None,
            _ if is_image => Some(index),
            _ => None,
        };
        *overlay
    }

    pub fn overlay(&self) -> Option<usize> {
        *self.overlay.lock()
    }

    fn begin_connecting(&self) {
        *self.state.lock() = LinkState::Connecting;
    }

    /// Transition Connecting → Open and install the outbound channel.
    /// Returns false if the session was released while the handshake was in
    /// flight — Closed is terminal, so the caller must abandon the link.
    fn open(&self, tx: mpsc::UnboundedSender<String>) -> bool {
        let mut state = self.state.lock();
        if *state != LinkState::Connecting {
            return false;
        }
        *state = LinkState::Open;
        *self.outbound.lock() = Some(tx);
        true
    }

    fn push_message(&self, message: ChatMessage) {
        self.messages.lock().push(message);
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

// ── Link task ──────────────────────────────────────────────────────────────

/// Spawn the link task for a freshly created session. The session is
/// Connecting from this point; the task flips it to Open on handshake and
/// guarantees Closed on every exit path.
pub fn spawn_link(app_handle: tauri::AppHandle, session: Arc<ChatSession>, ws_url: String) {
    session.begin_connecting();
    tauri::async_runtime::spawn(async move {
        run_link(&app_handle, &session, &ws_url).await;
        session.release();
        let _ = app_handle.emit(
            "chat-status",
            json!({"kind": "disconnected", "sessionId": session.session_id}),
        );
        info!("[chat] session {} closed", session.session_id);
    });
}

async fn run_link(app_handle: &tauri::AppHandle, session: &Arc<ChatSession>, ws_url: &str) {
    let ws_stream = match connect_async(ws_url).await {
        Ok((stream, _)) => stream,
        Err(e) => {
            // Establishment failure is silent beyond diagnostics: no message
            // is surfaced, and this session will never send.
            error!("[chat] connect {} failed: {}", ws_url, e);
            let _ = app_handle.emit("chat-status", json!({"kind": "error"}));
            return;
        }
    };
    let (mut ws_tx, mut ws_rx) = ws_stream.split();

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    if !session.open(out_tx) {
        debug!("[chat] session {} released during handshake", session.session_id);
        return;
    }
    let _ = app_handle.emit(
        "chat-status",
        json!({"kind": "connected", "sessionId": session.session_id}),
    );
    info!("[chat] session {} open on {}", session.session_id, ws_url);

    loop {
        tokio::select! {
            inbound = ws_rx.next() => {
                let text = match inbound {
                    Some(Ok(WsMessage::Text(t))) => t,
                    Some(Ok(WsMessage::Close(_))) | None => break,
                    Some(Err(e)) => {
                        warn!("[chat] transport error: {}", e);
                        break;
                    }
                    // Pings are answered by the transport; other frame
                    // kinds carry nothing for the interpreter.
                    Some(Ok(_)) => continue,
                };
                match classify::classify_frame(&text) {
                    Some(message) => {
                        session.push_message(message.clone());
                        let _ = app_handle.emit("chat-message", &message);
                    }
                    None => debug!("[chat] dropped null frame"),
                }
            }
            frame = out_rx.recv() => {
                match frame {
                    Some(encoded) => {
                        if let Err(e) = ws_tx.send(WsMessage::Text(encoded)).await {
                            warn!("[chat] send failed: {}", e);
                            break;
                        }
                    }
                    // Channel closed — the session was released.
                    None => break,
                }
            }
        }
    }
}
