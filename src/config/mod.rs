//! Configuration for the chat service client.
//!
//! The central type is [`ClientConfig`], built via [`ClientConfigBuilder`]:
//! service base URL, overall-call timeout, retry policy, and chunk
//! accumulation semantics. A built configuration is immutable and shared
//! across clients.

mod builder;
mod options;

pub use builder::{
    ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_INTERVAL, DEFAULT_TIMEOUT,
};
pub use options::{ChunkSemantics, ReadyState, SessionId};
