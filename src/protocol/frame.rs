//! Streaming wire format: `data: <json>` line frames.
//!
//! The service streams line-oriented UTF-8 text. Each meaningful line is a
//! `data: ` prefix followed by a JSON object tagged with a `type` field:
//!
//! ```text
//! data: {"type":"session","session_id":"abc"}
//! data: {"type":"chunk","message":"partial text"}
//! data: {"type":"done"}
//! data: {"type":"error","error":"message"}
//! ```
//!
//! Lines without the prefix are ignored, as are blank payloads. A payload
//! that is not JSON is forwarded verbatim as content (compatibility path
//! for servers that stream raw text).

use serde::Deserialize;

/// Prefix marking a data line in the stream.
pub const DATA_PREFIX: &str = "data: ";

/// One parsed application-level event from the stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Frame {
    /// Session metadata, informational only.
    Session(SessionFrame),
    /// An incremental piece of response text.
    Chunk(ChunkFrame),
    /// Terminal success.
    Done,
    /// Terminal failure with a server-provided message.
    Error(ErrorFrame),
    /// Any frame type this client does not recognize; ignored.
    #[serde(other)]
    Unknown,
}

/// Payload of a `session` frame.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SessionFrame {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Payload of a `chunk` frame.
///
/// Servers have been observed carrying the text in either `message` or
/// `content`; both are accepted.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChunkFrame {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChunkFrame {
    /// The carried text: the first non-empty of `message` / `content`.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.content.as_deref().filter(|t| !t.is_empty()))
    }
}

/// Payload of an `error` frame.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ErrorFrame {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorFrame {
    /// The carried message, or a generic fallback when the frame omits it.
    pub fn message(&self) -> &str {
        self.error
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("the stream reported an error")
    }
}

/// Classification of one complete line from the stream.
#[derive(Debug, Clone, PartialEq)]
pub enum DataLine {
    /// Not a data line, or a blank payload; nothing to do.
    Skip,
    /// A non-JSON payload, forwarded verbatim as content.
    Text(String),
    /// A parsed frame.
    Frame(Frame),
}

/// Classify one complete line from the stream.
///
/// JSON payloads that do not match a known frame shape (unrecognized or
/// missing `type`) classify as [`Frame::Unknown`] so new server-side frame
/// types pass through as no-ops rather than errors.
pub fn parse_line(line: &str) -> DataLine {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return DataLine::Skip;
    };
    if payload.trim().is_empty() {
        return DataLine::Skip;
    }

    match serde_json::from_str::<serde_json::Value>(payload) {
        Err(_) => DataLine::Text(payload.to_string()),
        Ok(value) => match serde_json::from_value::<Frame>(value) {
            Ok(frame) => DataLine::Frame(frame),
            Err(_) => DataLine::Frame(Frame::Unknown),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_frame() {
        let line = r#"data: {"type":"session","session_id":"abc-123"}"#;
        let parsed = parse_line(line);
        assert_eq!(
            parsed,
            DataLine::Frame(Frame::Session(SessionFrame {
                session_id: Some("abc-123".to_string())
            }))
        );
    }

    #[test]
    fn parses_chunk_with_message_field() {
        let line = r#"data: {"type":"chunk","message":"hello"}"#;
        match parse_line(line) {
            DataLine::Frame(Frame::Chunk(chunk)) => assert_eq!(chunk.text(), Some("hello")),
            other => panic!("expected chunk frame, got {other:?}"),
        }
    }

    #[test]
    fn parses_chunk_with_content_fallback() {
        let line = r#"data: {"type":"chunk","content":"from content"}"#;
        match parse_line(line) {
            DataLine::Frame(Frame::Chunk(chunk)) => {
                assert_eq!(chunk.text(), Some("from content"));
            }
            other => panic!("expected chunk frame, got {other:?}"),
        }
    }

    #[test]
    fn chunk_prefers_message_over_content() {
        let chunk = ChunkFrame {
            message: Some("primary".into()),
            content: Some("secondary".into()),
        };
        assert_eq!(chunk.text(), Some("primary"));
    }

    #[test]
    fn empty_chunk_text_is_none() {
        let chunk = ChunkFrame {
            message: Some(String::new()),
            content: None,
        };
        assert_eq!(chunk.text(), None);
    }

    #[test]
    fn parses_done_frame() {
        assert_eq!(
            parse_line(r#"data: {"type":"done"}"#),
            DataLine::Frame(Frame::Done)
        );
    }

    #[test]
    fn parses_error_frame() {
        let line = r#"data: {"type":"error","error":"boom"}"#;
        match parse_line(line) {
            DataLine::Frame(Frame::Error(err)) => assert_eq!(err.message(), "boom"),
            other => panic!("expected error frame, got {other:?}"),
        }
    }

    #[test]
    fn error_frame_without_message_uses_fallback() {
        let line = r#"data: {"type":"error"}"#;
        match parse_line(line) {
            DataLine::Frame(Frame::Error(err)) => {
                assert_eq!(err.message(), "the stream reported an error");
            }
            other => panic!("expected error frame, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_type_is_unknown() {
        let line = r#"data: {"type":"usage","tokens":42}"#;
        assert_eq!(parse_line(line), DataLine::Frame(Frame::Unknown));
    }

    #[test]
    fn json_without_type_is_unknown() {
        let line = r#"data: {"message":"untyped"}"#;
        assert_eq!(parse_line(line), DataLine::Frame(Frame::Unknown));
    }

    #[test]
    fn non_object_json_is_unknown() {
        assert_eq!(parse_line("data: 42"), DataLine::Frame(Frame::Unknown));
        assert_eq!(
            parse_line(r#"data: "just a string""#),
            DataLine::Frame(Frame::Unknown)
        );
    }

    #[test]
    fn non_json_payload_is_forwarded_verbatim() {
        assert_eq!(
            parse_line("data: not-json"),
            DataLine::Text("not-json".to_string())
        );
    }

    #[test]
    fn blank_payload_is_skipped() {
        assert_eq!(parse_line("data: "), DataLine::Skip);
        assert_eq!(parse_line("data:    "), DataLine::Skip);
    }

    #[test]
    fn unprefixed_lines_are_skipped() {
        assert_eq!(parse_line(""), DataLine::Skip);
        assert_eq!(parse_line("event: ping"), DataLine::Skip);
        assert_eq!(parse_line(": comment"), DataLine::Skip);
        // Prefix must match exactly, including the space.
        assert_eq!(parse_line("data:{\"type\":\"done\"}"), DataLine::Skip);
    }
}
