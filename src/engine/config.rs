// Abacus Engine — Backend Endpoint Configuration
//
// Where the client points: one HTTP base for the two form endpoints and one
// WebSocket URL for chat. Defaults target a local backend; overrides load
// from and save to a JSON settings file in the per-user config directory.
// Chat history is never persisted — only these endpoint settings touch disk.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

use crate::atoms::constants::{
    DEFAULT_BASE_URL, DEFAULT_CHAT_WS_URL, INVOICE_ATTACH_PATH, PREDICTION_PATH,
};
use crate::atoms::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub chat_ws_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: DEFAULT_BASE_URL.into(),
            chat_ws_url: DEFAULT_CHAT_WS_URL.into(),
        }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> ClientResult<()> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("base_url: {}", e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "base_url must be http(s), got {}",
                base.scheme()
            )));
        }
        let ws = Url::parse(&self.chat_ws_url)
            .map_err(|e| ClientError::Config(format!("chat_ws_url: {}", e)))?;
        if !matches!(ws.scheme(), "ws" | "wss") {
            return Err(ClientError::Config(format!(
                "chat_ws_url must be ws(s), got {}",
                ws.scheme()
            )));
        }
        Ok(())
    }

    pub fn invoice_url(&self) -> String {
        join_endpoint(&self.base_url, INVOICE_ATTACH_PATH)
    }

    pub fn prediction_url(&self) -> String {
        join_endpoint(&self.base_url, PREDICTION_PATH)
    }
}

fn join_endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

// ── Settings file ──────────────────────────────────────────────────────────

fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("abacus").join("settings.json"))
}

/// Load saved settings, falling back to defaults on any problem. A corrupt
/// or missing settings file never blocks startup.
pub fn load() -> BackendConfig {
    let Some(path) = settings_path() else {
        return BackendConfig::default();
    };
    match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str::<BackendConfig>(&content) {
            Ok(config) => {
                info!("[config] loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                warn!("[config] ignoring unparsable {}: {}", path.display(), e);
                BackendConfig::default()
            }
        },
        Err(_) => BackendConfig::default(),
    }
}

/// Validate and write settings.
pub fn save(config: &BackendConfig) -> ClientResult<()> {
    config.validate()?;
    let path = settings_path()
        .ok_or_else(|| ClientError::Config("no user config directory".into()))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_json::to_string_pretty(config)?)?;
    info!("[config] saved settings to {}", path.display());
    Ok(())
}
