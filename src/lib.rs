//! # libqchat
//!
//! Async Rust client for a Q chat API service.
//!
//! This library provides a typed interface to a chat assistant backend,
//! supporting:
//! - Streaming responses with incremental text callbacks
//! - Non-streaming chat requests
//! - Session management (create, inspect, list, delete)
//! - File upload, download, and listing per session
//!
//! ## Quick Start
//!
//! ```ignore
//! use libqchat::{QChatClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = QChatClient::new()?;
//!     let session = client.create_session().await?;
//!     let reply = client
//!         .send_message(&session.session_id.into(), "What is 2+2?")
//!         .await?;
//!     println!("{}", reply.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! ```ignore
//! use libqchat::{ClientConfig, StreamClient};
//!
//! let mut stream = StreamClient::new(ClientConfig::builder().build()?);
//! stream.start_stream(
//!     "session-123",
//!     "Write a poem",
//!     |text| print!("{text}"),
//!     || println!("\n[done]"),
//!     |err| eprintln!("stream failed: {err}"),
//! );
//! ```
//!
//! The reader delivers each chunk in arrival order, fires exactly one
//! terminal callback per exchange, retries failed connection attempts with
//! a fixed backoff, and enforces an overall timeout. `stop()` cancels
//! silently — no callback fires.
//!
//! ## Collecting
//!
//! ```ignore
//! let text = stream.collect("session-123", "Summarize the file").await?;
//! ```
//!
//! ## Configuration
//!
//! ```ignore
//! use std::time::Duration;
//! use libqchat::QChatClient;
//!
//! let client = QChatClient::builder()
//!     .base_url("http://chat.internal:8080")
//!     .timeout(Duration::from_secs(120))
//!     .retry_interval(Duration::from_secs(1))
//!     .max_retries(5)
//!     .build()?;
//! ```

mod client;
pub mod config;
mod error;
pub mod protocol;
pub mod stream;
pub mod transport;

pub use error::{Error, Result};

// Re-export the main client types at crate root
pub use client::{ClientBuilder, QChatClient};

// Re-export commonly used config types at crate root
pub use config::{ChunkSemantics, ClientConfig, ClientConfigBuilder, ReadyState, SessionId};

// Re-export commonly used protocol types at crate root
pub use protocol::{
    ChatReply, DataLine, FileEntry, FileUploadReply, Frame, HealthStatus, SessionCreated,
    SessionDetails,
};

// Re-export commonly used stream types at crate root
pub use stream::{LineDecoder, StreamClient};

// Re-export commonly used transport types at crate root
pub use transport::{ByteStream, Connection, HttpTransport, StreamRequest, Transport};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}
    fn assert_send<T: Send>() {}

    /// All major public types must be Send + Sync for use across async tasks.
    #[test]
    fn public_types_are_send_sync() {
        // Main client types
        assert_send_sync::<QChatClient>();
        assert_send_sync::<ClientBuilder>();
        assert_send_sync::<StreamClient>();

        // Configuration types
        assert_send_sync::<ClientConfig>();
        assert_send_sync::<ClientConfigBuilder>();
        assert_send_sync::<ChunkSemantics>();
        assert_send_sync::<ReadyState>();
        assert_send_sync::<SessionId>();

        // Protocol types
        assert_send_sync::<Frame>();
        assert_send_sync::<DataLine>();
        assert_send_sync::<ChatReply>();
        assert_send_sync::<SessionCreated>();
        assert_send_sync::<SessionDetails>();
        assert_send_sync::<FileEntry>();
        assert_send_sync::<FileUploadReply>();
        assert_send_sync::<HealthStatus>();

        // Transport types
        assert_send_sync::<HttpTransport>();
        assert_send_sync::<StreamRequest>();

        // Stream types
        assert_send_sync::<LineDecoder>();

        // Error type
        assert_send_sync::<Error>();
    }

    /// Connection carries a boxed byte stream: Send but not Sync.
    #[test]
    fn connection_is_send() {
        assert_send::<Connection>();
    }
}
