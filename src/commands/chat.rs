// Abacus Commands — Chat
//
// View lifecycle wiring: mount connects, unmount disconnects, and the page
// talks to the session in between. Inbound messages stream to the page via
// `chat-message` events; these commands cover the request/response side.

use log::info;
use std::sync::Arc;
use tauri::State;

use crate::engine::chat::{self, ChatSession, SendOutcome};
use crate::engine::state::EngineState;
use crate::engine::types::{ChatMessage, LinkState};

/// Activate a chat view: create a fresh session and open its connection.
/// Any previously mounted session is released first — one connection per
/// mounted view. Returns the new session id.
#[tauri::command]
pub fn chat_connect(
    app_handle: tauri::AppHandle,
    state: State<'_, EngineState>,
) -> Result<String, String> {
    let ws_url = state.config.lock().chat_ws_url.clone();
    let session = Arc::new(ChatSession::new());
    let session_id = session.session_id.clone();

    if let Some(previous) = state.chat.lock().replace(session.clone()) {
        previous.release();
    }
    info!("[chat] session {} connecting to {}", session_id, ws_url);
    chat::spawn_link(app_handle, session, ws_url);
    Ok(session_id)
}

/// Deactivate the chat view: release the connection unconditionally and
/// discard the in-memory message list.
#[tauri::command]
pub fn chat_disconnect(state: State<'_, EngineState>) {
    if let Some(session) = state.chat.lock().take() {
        session.release();
    }
}

/// Composer submit. Gated sends return their outcome rather than an error;
/// the page leaves the input buffer untouched unless the status is `sent`.
#[tauri::command]
pub fn chat_send(state: State<'_, EngineState>, text: String) -> SendOutcome {
    match state.chat.lock().as_ref() {
        Some(session) => session.send(&text),
        None => SendOutcome::NotConnected,
    }
}

#[tauri::command]
pub fn chat_messages(state: State<'_, EngineState>) -> Vec<ChatMessage> {
    state
        .chat
        .lock()
        .as_ref()
        .map(|session| session.messages())
        .unwrap_or_default()
}

#[tauri::command]
pub fn chat_link_state(state: State<'_, EngineState>) -> LinkState {
    state
        .chat
        .lock()
        .as_ref()
        .map(|session| session.link_state())
        .unwrap_or(LinkState::Idle)
}

/// Toggle the image overlay for the message at `index`. Returns the index
/// now shown, if any.
#[tauri::command]
pub fn chat_toggle_overlay(state: State<'_, EngineState>, index: usize) -> Option<usize> {
    state
        .chat
        .lock()
        .as_ref()
        .and_then(|session| session.toggle_overlay(index))
}
