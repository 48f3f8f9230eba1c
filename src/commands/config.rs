// Abacus Commands — Backend Settings

use tauri::State;

use crate::engine::config::{self, BackendConfig};
use crate::engine::state::EngineState;

#[tauri::command]
pub fn get_backend_config(state: State<'_, EngineState>) -> BackendConfig {
    state.config.lock().clone()
}

/// Validate, persist, and apply new endpoint settings. The running chat
/// session keeps its current connection; the new WebSocket URL applies
/// from the next `chat_connect`.
#[tauri::command]
pub fn set_backend_config(
    state: State<'_, EngineState>,
    config: BackendConfig,
) -> Result<(), String> {
    config::save(&config).map_err(|e| e.to_string())?;
    *state.config.lock() = config;
    Ok(())
}
