// Abacus Engine — Shared State
//
// The Tauri-managed state cell: current endpoint config, the chat session
// for the mounted view (if any), one shared HTTP client, and the busy flags
// that keep the two one-shot forms single-flight.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::engine::chat::ChatSession;
use crate::engine::config::{self, BackendConfig};

pub struct EngineState {
    pub config: Mutex<BackendConfig>,
    /// The session owned by the currently mounted chat view. Replacing it
    /// releases the previous session's connection.
    pub chat: Mutex<Option<Arc<ChatSession>>>,
    pub http: reqwest::Client,
    pub upload_busy: AtomicBool,
    pub predict_busy: AtomicBool,
}

impl EngineState {
    pub fn new() -> Self {
        EngineState {
            config: Mutex::new(config::load()),
            chat: Mutex::new(None),
            http: reqwest::Client::new(),
            upload_busy: AtomicBool::new(false),
            predict_busy: AtomicBool::new(false),
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the flag when the request scope ends, on every exit path.
pub struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Claim a busy flag. Returns `None` while a prior request is pending.
pub fn try_claim(flag: &AtomicBool) -> Option<BusyGuard<'_>> {
    flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .ok()
        .map(|_| BusyGuard(flag))
}
