//! Type-safe option values for the chat service client.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Newtype for session IDs to prevent string mixups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Create a new SessionId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        SessionId(id.into())
    }

    /// Get the session ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        SessionId(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId(s.to_string())
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Connection state of a stream reader, observable by callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ReadyState {
    /// No session is active.
    #[default]
    Closed = 0,
    /// A session is open and the reader is connecting or reading.
    Open = 1,
}

impl ReadyState {
    pub(crate) fn from_u8(value: u8) -> Self {
        if value == ReadyState::Open as u8 {
            ReadyState::Open
        } else {
            ReadyState::Closed
        }
    }

    /// Check if a session is currently open.
    pub fn is_open(self) -> bool {
        self == ReadyState::Open
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadyState::Closed => write!(f, "closed"),
            ReadyState::Open => write!(f, "open"),
        }
    }
}

/// How `chunk` frame payloads relate to the message being streamed.
///
/// The wire format does not state whether each chunk carries an increment
/// or the full message-so-far, so the accumulation policy is an explicit
/// configuration choice. Data callbacks always receive payloads verbatim;
/// only accumulation helpers such as
/// [`StreamClient::collect`](crate::StreamClient::collect) apply this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChunkSemantics {
    /// Each chunk is an increment appended to previously received text.
    #[default]
    Delta,
    /// Each chunk replaces the message-so-far.
    Snapshot,
}

impl fmt::Display for ChunkSemantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkSemantics::Delta => write!(f, "delta"),
            ChunkSemantics::Snapshot => write!(f, "snapshot"),
        }
    }
}
