// Abacus Engine — Domain Types
//
// The chat data model: who sent a message, which single payload kind it
// carries, and the per-view session correlation id. Payload kinds are
// mutually exclusive at construction — a message is an image OR markdown
// OR plain text, decided once by the classifier and never revised.

use serde::{Deserialize, Serialize};

// ── Sender ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Resolve a decoded `sender` field: `"user"` maps to the user,
    /// anything else (including absence) to the bot.
    pub fn from_field(value: Option<&str>) -> Self {
        if value == Some("user") {
            Sender::User
        } else {
            Sender::Bot
        }
    }
}

// ── Image kind ─────────────────────────────────────────────────────────────

/// MIME kind of a base64 image payload, detected from the first characters
/// of the encoded data — the payload is never decoded client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageKind {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/gif")]
    Gif,
    #[serde(rename = "image/png")]
    Png,
}

impl ImageKind {
    /// Sniff the base64 prefix: JPEG (`\xFF\xD8\xFF`) encodes to `/9j/`,
    /// GIF87a/GIF89a (`GIF8…`) encode to `R0lGOD…`. Everything else is
    /// treated as PNG.
    pub fn sniff(payload: &str) -> Self {
        if payload.starts_with("/9j/") {
            ImageKind::Jpeg
        } else if payload.starts_with("R0lGOD") {
            ImageKind::Gif
        } else {
            ImageKind::Png
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Gif => "image/gif",
            ImageKind::Png => "image/png",
        }
    }
}

// ── Message payload ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessagePayload {
    /// Base64 image data with its detected MIME kind.
    Image { data: String, mime: ImageKind },
    /// Markdown the page renders as rich text.
    Markdown { text: String },
    /// Plain text rendered verbatim.
    Text { text: String },
}

// ── Chat message ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    #[serde(flatten)]
    pub payload: MessagePayload,
    /// Opaque id correlating a message to the view instance that produced it.
    #[serde(rename = "sessionId", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

// ── Link state ─────────────────────────────────────────────────────────────

/// Connection lifecycle of one chat session. `Closed` is terminal: once a
/// session leaves `Open` it never sends again — a remounted view gets a
/// fresh session instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    Idle,
    Connecting,
    Open,
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sniffs_jpeg_marker() {
        assert_eq!(ImageKind::sniff("/9j/4AAQSkZJRg=="), ImageKind::Jpeg);
    }

    #[test]
    fn sniffs_gif_markers() {
        // GIF89a and GIF87a share the R0lGOD prefix
        assert_eq!(ImageKind::sniff("R0lGODlhAQABAAAAACw="), ImageKind::Gif);
        assert_eq!(ImageKind::sniff("R0lGODdhAQABAAAAACw="), ImageKind::Gif);
    }

    #[test]
    fn defaults_to_png() {
        assert_eq!(ImageKind::sniff("iVBORw0KGgo="), ImageKind::Png);
        assert_eq!(ImageKind::sniff(""), ImageKind::Png);
    }

    #[test]
    fn image_kind_serializes_as_mime() {
        assert_eq!(serde_json::to_value(ImageKind::Jpeg).unwrap(), json!("image/jpeg"));
        assert_eq!(serde_json::to_value(ImageKind::Gif).unwrap(), json!("image/gif"));
        assert_eq!(serde_json::to_value(ImageKind::Png).unwrap(), json!("image/png"));
    }

    #[test]
    fn sender_resolution() {
        assert_eq!(Sender::from_field(Some("user")), Sender::User);
        assert_eq!(Sender::from_field(Some("bot")), Sender::Bot);
        assert_eq!(Sender::from_field(Some("assistant")), Sender::Bot);
        assert_eq!(Sender::from_field(None), Sender::Bot);
    }

    #[test]
    fn message_serialization_shape() {
        let msg = ChatMessage {
            sender: Sender::Bot,
            payload: MessagePayload::Image {
                data: "/9j/4AAQ".into(),
                mime: ImageKind::Jpeg,
            },
            session_id: Some("s-1".into()),
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "sender": "bot",
                "kind": "image",
                "data": "/9j/4AAQ",
                "mime": "image/jpeg",
                "sessionId": "s-1",
            })
        );
    }

    #[test]
    fn absent_session_id_is_omitted() {
        let msg = ChatMessage {
            sender: Sender::User,
            payload: MessagePayload::Text { text: "hi".into() },
            session_id: None,
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"sender": "user", "kind": "text", "text": "hi"}));
    }
}
