//! Byte-stream transport for the streaming chat endpoint.
//!
//! The stream reader consumes a [`Transport`]: something that can take a
//! [`StreamRequest`] and hand back an incrementally readable response body.
//! Production code uses [`HttpTransport`]; tests substitute a scripted
//! implementation to drive the reader without a network.

mod http;

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use serde::Serialize;

use crate::config::SessionId;
use crate::Result;

pub use http::HttpTransport;

/// An incrementally readable response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// The request that opens a streaming chat exchange.
///
/// Serializes to the wire body `{"session_id": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamRequest {
    pub session_id: SessionId,
    pub message: String,
}

impl StreamRequest {
    /// Create a new stream request.
    pub fn new(session_id: impl Into<SessionId>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
        }
    }
}

/// An open streaming exchange.
pub struct Connection {
    /// The response body, or `None` when the server replied without one.
    pub body: Option<ByteStream>,
}

/// Something that can open a streaming chat exchange.
///
/// # Contract
///
/// - Connection-level failures map to [`Error::Network`](crate::Error::Network)
///   (the reader retries these).
/// - Non-success responses map to
///   [`Error::HttpStatus`](crate::Error::HttpStatus) (fatal).
/// - On success the body yields chunks as they arrive; implementations must
///   not buffer the whole body before returning.
/// - Dropping the returned [`Connection`] cancels the exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the exchange and return its response body.
    async fn connect(&self, request: &StreamRequest) -> Result<Connection>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_request_serializes_to_wire_body() {
        let request = StreamRequest::new("abc-123", "hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"session_id": "abc-123", "message": "hello"})
        );
    }

    #[test]
    fn transport_types_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<StreamRequest>();
        assert_send::<Connection>();
    }
}
