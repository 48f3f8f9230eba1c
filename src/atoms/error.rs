// ── Abacus Atoms: Error Types ──────────────────────────────────────────────
// Single canonical error enum for the client engine, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by domain (I/O, JSON, HTTP, transport…).
//   • The `#[from]` attribute wires std/external error conversions automatically.
//   • `ClientError` → `String` conversion is provided via `Display` so that
//     Tauri command boundaries (`Result<T, String>`) can call `.map_err(|e|
//     e.to_string())` without boilerplate.

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ClientError {
    /// Filesystem or OS-level I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP / network failure (reqwest layer).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// WebSocket transport failure (tungstenite layer).
    #[error("Transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// Endpoint configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invoice upload rejected, locally or by the backend.
    /// The message is exactly what the page shows.
    #[error("{0}")]
    Upload(String),

    /// Form input rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// Catch-all for errors that do not yet have a dedicated variant.
    /// Prefer adding a specific variant over using this in new code.
    #[error("{0}")]
    Other(String),
}

// ── Migration bridge: String → ClientError ─────────────────────────────────
// Allows `?` on functions still returning `Result<T, String>` inside functions
// that return `ClientResult<T>`.

impl From<String> for ClientError {
    fn from(s: String) -> Self {
        ClientError::Other(s)
    }
}

impl From<&str> for ClientError {
    fn from(s: &str) -> Self {
        ClientError::Other(s.to_string())
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All engine operations should return this type.
/// At Tauri command boundaries, convert with `.map_err(|e| e.to_string())`.
pub type ClientResult<T> = Result<T, ClientError>;

// ── Conversion: ClientError → String ───────────────────────────────────────
// Lets Tauri command functions call `.map_err(ClientError::into)` directly.

impl From<ClientError> for String {
    fn from(e: ClientError) -> Self {
        e.to_string()
    }
}
