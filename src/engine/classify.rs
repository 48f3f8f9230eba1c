// Abacus Engine — Inbound Frame Classifier
//
// Maps one raw WebSocket frame from the backend to zero or one ChatMessage.
// The backend's frames are free-form: structured records, bare markdown, or
// anything in between. Rather than probing fields ad hoc at render time, the
// frame is decoded once into an explicit sum type (`FrameShape`), resolved
// in strict precedence order:
//
//   image > markdown > typed-markdown wrapper > text > generic content > raw
//
// No error escapes this module: an undecodable frame degrades to bot
// markdown, and any missing/mistyped field falls through to the next branch.

use serde_json::Value;

use crate::engine::types::{ChatMessage, ImageKind, MessagePayload, Sender};

// ── Frame shapes ───────────────────────────────────────────────────────────

/// The recognized shapes of one decoded inbound record, in precedence order.
/// Each variant carries the content that survives into the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameShape {
    /// Record with a non-empty base64 `image` field.
    Image(String),
    /// Record with a non-empty `markdown` field.
    Markdown(String),
    /// Record shaped `{"type": "markdown", "content": …}`. Always from the bot.
    TypedMarkdown(String),
    /// Record with a non-empty `text` field.
    Text(String),
    /// Record with any `content` field, stringified and shown as markdown.
    GenericContent(String),
    /// Anything else — the whole record, stringified. Always from the bot.
    Unknown(String),
}

impl FrameShape {
    /// Resolve a decoded (non-null) value to its shape. Infallible: the
    /// `Unknown` catch-all absorbs every record no earlier branch claims,
    /// including non-object values like numbers and arrays.
    pub fn from_value(value: &Value) -> FrameShape {
        if let Some(data) = non_empty_str(value, "image") {
            return FrameShape::Image(data);
        }
        if let Some(text) = non_empty_str(value, "markdown") {
            return FrameShape::Markdown(text);
        }
        if value.get("type").and_then(Value::as_str) == Some("markdown") {
            if let Some(text) = non_empty_str(value, "content") {
                return FrameShape::TypedMarkdown(text);
            }
        }
        if let Some(text) = non_empty_str(value, "text") {
            return FrameShape::Text(text);
        }
        if let Some(content) = value.get("content") {
            return FrameShape::GenericContent(stringify(content));
        }
        FrameShape::Unknown(stringify(value))
    }
}

fn non_empty_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// String values pass through verbatim; everything else uses its compact
/// JSON encoding.
fn stringify(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

// ── Classification ─────────────────────────────────────────────────────────

/// Classify one raw inbound frame. Returns `None` only for frames that
/// decode to JSON `null` — those are dropped without producing a message.
pub fn classify_frame(raw: &str) -> Option<ChatMessage> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        // Not JSON at all: the whole frame is bot markdown.
        Err(_) => {
            return Some(ChatMessage {
                sender: Sender::Bot,
                payload: MessagePayload::Markdown { text: raw.to_string() },
                session_id: None,
            });
        }
    };
    if value.is_null() {
        return None;
    }

    let sender = Sender::from_field(value.get("sender").and_then(Value::as_str));
    let session_id = value
        .get("sessionId")
        .and_then(Value::as_str)
        .map(str::to_string);

    let (sender, payload) = match FrameShape::from_value(&value) {
        FrameShape::Image(data) => {
            let mime = ImageKind::sniff(&data);
            (sender, MessagePayload::Image { data, mime })
        }
        FrameShape::Markdown(text) => (sender, MessagePayload::Markdown { text }),
        FrameShape::TypedMarkdown(text) => (Sender::Bot, MessagePayload::Markdown { text }),
        FrameShape::Text(text) => (sender, MessagePayload::Text { text }),
        FrameShape::GenericContent(text) => (sender, MessagePayload::Markdown { text }),
        FrameShape::Unknown(text) => (Sender::Bot, MessagePayload::Text { text }),
    };

    Some(ChatMessage { sender, payload, session_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(value: Value) -> ChatMessage {
        classify_frame(&value.to_string()).expect("frame should produce a message")
    }

    #[test]
    fn non_json_frame_becomes_bot_markdown() {
        let msg = classify_frame("**hello** world").unwrap();
        assert_eq!(msg.sender, Sender::Bot);
        assert_eq!(
            msg.payload,
            MessagePayload::Markdown { text: "**hello** world".into() }
        );
        assert_eq!(msg.session_id, None);
    }

    #[test]
    fn null_frame_is_dropped() {
        assert_eq!(classify_frame("null"), None);
    }

    #[test]
    fn jpeg_image_frame() {
        let msg = classify(json!({"image": "/9j/4AAQSkZJRg==", "sender": "bot"}));
        assert_eq!(msg.sender, Sender::Bot);
        assert_eq!(
            msg.payload,
            MessagePayload::Image { data: "/9j/4AAQSkZJRg==".into(), mime: ImageKind::Jpeg }
        );
    }

    #[test]
    fn gif_and_png_detection() {
        let gif = classify(json!({"image": "R0lGODlhAQABAA=="}));
        assert!(matches!(gif.payload, MessagePayload::Image { mime: ImageKind::Gif, .. }));

        let png = classify(json!({"image": "iVBORw0KGgoAAAA="}));
        assert!(matches!(png.payload, MessagePayload::Image { mime: ImageKind::Png, .. }));
    }

    #[test]
    fn image_wins_over_every_other_field() {
        let msg = classify(json!({
            "image": "/9j/abc",
            "markdown": "# m",
            "text": "t",
            "content": "c",
        }));
        assert!(matches!(msg.payload, MessagePayload::Image { .. }));
    }

    #[test]
    fn image_carries_session_and_sender() {
        let msg = classify(json!({
            "image": "/9j/abc",
            "sender": "user",
            "sessionId": "tab-7",
        }));
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.session_id.as_deref(), Some("tab-7"));
    }

    #[test]
    fn empty_image_field_falls_through() {
        let msg = classify(json!({"image": "", "text": "fallback"}));
        assert_eq!(msg.payload, MessagePayload::Text { text: "fallback".into() });
    }

    #[test]
    fn markdown_field_beats_text() {
        let msg = classify(json!({"markdown": "# title", "text": "plain", "sender": "user"}));
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.payload, MessagePayload::Markdown { text: "# title".into() });
    }

    #[test]
    fn typed_markdown_wrapper_forces_bot() {
        let msg = classify(json!({"type": "markdown", "content": "## body", "sender": "user"}));
        assert_eq!(msg.sender, Sender::Bot);
        assert_eq!(msg.payload, MessagePayload::Markdown { text: "## body".into() });
    }

    #[test]
    fn typed_markdown_without_content_falls_through() {
        let msg = classify(json!({"type": "markdown", "text": "hi"}));
        assert_eq!(msg.payload, MessagePayload::Text { text: "hi".into() });
    }

    #[test]
    fn plain_text_frame() {
        let msg = classify(json!({"text": "hi there", "sender": "bot"}));
        assert_eq!(msg.sender, Sender::Bot);
        assert_eq!(msg.payload, MessagePayload::Text { text: "hi there".into() });
        assert_eq!(msg.session_id, None);
    }

    #[test]
    fn generic_content_string_passes_verbatim() {
        let msg = classify(json!({"content": "just content", "sender": "user"}));
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.payload, MessagePayload::Markdown { text: "just content".into() });
    }

    #[test]
    fn generic_content_object_is_json_encoded() {
        let msg = classify(json!({"content": {"a": 1}}));
        assert_eq!(msg.payload, MessagePayload::Markdown { text: "{\"a\":1}".into() });
    }

    #[test]
    fn unknown_record_is_stringified_bot_text() {
        let msg = classify(json!({"foo": 42}));
        assert_eq!(msg.sender, Sender::Bot);
        assert_eq!(msg.payload, MessagePayload::Text { text: "{\"foo\":42}".into() });
    }

    #[test]
    fn non_object_values_hit_the_catch_all() {
        let num = classify(json!(17));
        assert_eq!(num.payload, MessagePayload::Text { text: "17".into() });

        let arr = classify(json!([1, 2]));
        assert_eq!(arr.payload, MessagePayload::Text { text: "[1,2]".into() });

        // A bare JSON string is a decoded value, not an undecodable frame.
        let s = classify(json!("plain"));
        assert_eq!(s.sender, Sender::Bot);
        assert_eq!(s.payload, MessagePayload::Text { text: "plain".into() });
    }

    #[test]
    fn every_frame_yields_at_most_one_message() {
        for frame in [
            json!({"image": "/9j/x"}).to_string(),
            json!({"markdown": "m"}).to_string(),
            json!({"text": "t"}).to_string(),
            "not json".to_string(),
        ] {
            assert!(classify_frame(&frame).is_some());
        }
        assert!(classify_frame("null").is_none());
    }
}
