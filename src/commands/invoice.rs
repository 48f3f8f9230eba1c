// Abacus Commands — Invoice Upload

use serde_json::Value;
use tauri::State;

use crate::atoms::constants::ERR_BUSY;
use crate::engine::invoice;
use crate::engine::state::{self, EngineState};

/// Upload one picked file. The busy flag keeps the form single-flight;
/// the MIME precondition and error strings come from the engine.
#[tauri::command]
pub async fn upload_invoice(
    state: State<'_, EngineState>,
    file_name: String,
    mime_type: String,
    data: Vec<u8>,
) -> Result<Value, String> {
    let _busy = state::try_claim(&state.upload_busy).ok_or(ERR_BUSY)?;
    let endpoint = state.config.lock().invoice_url();
    invoice::attach(&state.http, &endpoint, &file_name, &mime_type, data)
        .await
        .map_err(|e| e.to_string())
}
