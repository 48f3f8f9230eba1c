// ── Abacus Atoms: Constants ────────────────────────────────────────────────
// Backend endpoints, wire literals, and user-visible strings shared across
// the engine and command layers.

/// Default backend HTTP base. Overridable via the settings file.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default chat WebSocket endpoint. Overridable via the settings file.
pub const DEFAULT_CHAT_WS_URL: &str = "ws://localhost:8000/ws/chat";

/// Path of the invoice-attachment endpoint, relative to the base URL.
pub const INVOICE_ATTACH_PATH: &str = "/invoice/attach";

/// Path of the prediction endpoint, relative to the base URL.
pub const PREDICTION_PATH: &str = "/predictive-accounting";

/// The only MIME type the invoice upload accepts.
pub const PDF_MIME: &str = "application/pdf";

// ── User-visible error strings ─────────────────────────────────────────────

pub const ERR_NOT_PDF: &str = "Only PDF files are allowed.";
pub const ERR_UPLOAD_FAILED: &str = "Upload failed";
pub const ERR_SUBMISSION_FAILED: &str = "Submission failed";
pub const ERR_BUSY: &str = "Request already in progress";
