//! Test utilities for libqchat integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use libqchat::transport::{Connection, StreamRequest, Transport};
use libqchat::{Error, Result};

/// One scripted outcome for a transport connection attempt.
pub enum Attempt {
    /// Succeed with a body that yields these chunks, then ends.
    Body(Vec<Bytes>),
    /// Succeed with a body that yields these chunks, then never ends.
    BodyThenHang(Vec<Bytes>),
    /// Succeed with a response that has no readable body.
    NoBody,
    /// Fail with a connection-level error.
    NetworkError(&'static str),
    /// Fail with an HTTP status error.
    HttpError(u16, &'static str),
    /// Never produce a response.
    Hang,
}

/// A transport that replays a script of connection attempts.
///
/// Attempts are consumed in order, one per `connect` call; calls past the
/// end of the script hang. The call count is observable for retry
/// assertions.
pub struct MockTransport {
    attempts: Mutex<VecDeque<Attempt>>,
    calls: AtomicU32,
}

impl MockTransport {
    /// Create a transport replaying the given attempts.
    pub fn new(attempts: Vec<Attempt>) -> Self {
        Self {
            attempts: Mutex::new(attempts.into_iter().collect()),
            calls: AtomicU32::new(0),
        }
    }

    /// How many times `connect` has been called.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&self, _request: &StreamRequest) -> Result<Connection> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let attempt = self.attempts.lock().unwrap().pop_front();
        match attempt {
            Some(Attempt::Body(chunks)) => {
                let items: Vec<Result<Bytes>> = chunks.into_iter().map(Ok).collect();
                Ok(Connection {
                    body: Some(Box::pin(futures::stream::iter(items))),
                })
            }
            Some(Attempt::BodyThenHang(chunks)) => {
                let items: Vec<Result<Bytes>> = chunks.into_iter().map(Ok).collect();
                let delivered = futures::stream::iter(items);
                let tail = futures::stream::pending::<Result<Bytes>>();
                Ok(Connection {
                    body: Some(Box::pin(delivered.chain(tail))),
                })
            }
            Some(Attempt::NoBody) => Ok(Connection { body: None }),
            Some(Attempt::NetworkError(message)) => Err(Error::network(message)),
            Some(Attempt::HttpError(status, message)) => Err(Error::HttpStatus {
                status,
                message: message.to_string(),
                body: None,
            }),
            Some(Attempt::Hang) | None => {
                futures::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

/// Builder for realistic wire content.
pub struct ScenarioBuilder {
    wire: String,
    session_id: String,
}

impl ScenarioBuilder {
    /// Create a new scenario builder.
    pub fn new() -> Self {
        Self {
            wire: String::new(),
            session_id: "test-session-123".to_string(),
        }
    }

    /// Add a session metadata frame.
    pub fn session(mut self) -> Self {
        let frame = serde_json::json!({"type": "session", "session_id": self.session_id});
        self.wire.push_str(&format!("data: {frame}\n\n"));
        self
    }

    /// Add a chunk frame carrying the given text.
    pub fn chunk(mut self, text: &str) -> Self {
        let frame = serde_json::json!({"type": "chunk", "message": text});
        self.wire.push_str(&format!("data: {frame}\n\n"));
        self
    }

    /// Add a terminal done frame.
    pub fn done(mut self) -> Self {
        self.wire.push_str("data: {\"type\":\"done\"}\n\n");
        self
    }

    /// Add a terminal error frame.
    pub fn error(mut self, message: &str) -> Self {
        let frame = serde_json::json!({"type": "error", "error": message});
        self.wire.push_str(&format!("data: {frame}\n\n"));
        self
    }

    /// Add a raw line as-is (newline appended).
    pub fn raw_line(mut self, line: &str) -> Self {
        self.wire.push_str(line);
        self.wire.push('\n');
        self
    }

    /// Build the wire content as a single body chunk.
    pub fn build(self) -> Vec<Bytes> {
        vec![Bytes::from(self.wire)]
    }

    /// Build the wire content split into chunks of at most `size` bytes.
    ///
    /// Splits fall wherever they fall — mid-line and mid-character
    /// included — to exercise the reader's buffering.
    pub fn build_split(self, size: usize) -> Vec<Bytes> {
        self.wire
            .into_bytes()
            .chunks(size)
            .map(Bytes::copy_from_slice)
            .collect()
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}
