// Abacus Commands — Predictive Accounting

use serde_json::Value;
use tauri::State;

use crate::atoms::constants::ERR_BUSY;
use crate::engine::accounting::{self, PredictionRequest};
use crate::engine::state::{self, EngineState};

/// Submit the prediction form. Input is validated before any network call;
/// a failed request comes back as an error-shaped object, not an error.
#[tauri::command]
pub async fn predict_accounting(
    state: State<'_, EngineState>,
    request: PredictionRequest,
) -> Result<Value, String> {
    let _busy = state::try_claim(&state.predict_busy).ok_or(ERR_BUSY)?;
    accounting::validate(&request).map_err(|e| e.to_string())?;
    let endpoint = state.config.lock().prediction_url();
    Ok(accounting::predict(&state.http, &endpoint, &request).await)
}
