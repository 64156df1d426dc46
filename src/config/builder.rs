//! Client configuration and builder.
//!
//! This module provides the builder pattern for configuring the chat
//! service client.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use libqchat::config::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .base_url("http://chat.internal:8080")
//!     .timeout(Duration::from_secs(120))
//!     .max_retries(5)
//!     .build()?;
//! ```

use std::time::Duration;

use super::options::ChunkSemantics;
use crate::{Error, Result};

/// Default service URL when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default overall-call timeout: 650 seconds, long enough for slow tasks.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(650);

/// Default delay between failed connection attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(3);

/// Default number of additional connection attempts after a failure.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for the chat service client.
///
/// Use [`ClientConfig::builder()`] to create a new configuration.
/// Immutable once built; shared across clients via `Arc`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) retry_interval: Duration,
    pub(crate) max_retries: u32,
    pub(crate) chunk_semantics: ChunkSemantics,
}

impl ClientConfig {
    /// Create a new builder for ClientConfig.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Get the service base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the overall-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the delay between failed connection attempts.
    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Get the maximum number of additional connection attempts.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Get the configured chunk accumulation semantics.
    pub fn chunk_semantics(&self) -> ChunkSemantics {
        self.chunk_semantics
    }

    /// Build a full endpoint URL from a service path.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            max_retries: DEFAULT_MAX_RETRIES,
            chunk_semantics: ChunkSemantics::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
///
/// The builder validates the configuration when
/// [`build()`](ClientConfigBuilder::build) is called.
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    base_url: String,
    timeout: Duration,
    retry_interval: Duration,
    max_retries: u32,
    chunk_semantics: ChunkSemantics,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            max_retries: DEFAULT_MAX_RETRIES,
            chunk_semantics: ChunkSemantics::default(),
        }
    }
}

impl ClientConfigBuilder {
    /// Set the service base URL.
    ///
    /// A trailing slash is trimmed so endpoint paths can be appended as-is.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the overall-call timeout.
    ///
    /// Bounds the whole exchange including retries and backoff waits.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the delay between failed connection attempts.
    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Set the maximum number of additional connection attempts.
    ///
    /// A call makes at most `max_retries + 1` connection attempts.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set how chunk payloads are accumulated by collection helpers.
    pub fn chunk_semantics(mut self, semantics: ChunkSemantics) -> Self {
        self.chunk_semantics = semantics;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the base URL is empty or the
    /// timeout is zero.
    pub fn build(self) -> Result<ClientConfig> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::InvalidConfig("base URL must not be empty".into()));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must be non-zero".into()));
        }

        Ok(ClientConfig {
            base_url,
            timeout: self.timeout,
            retry_interval: self.retry_interval,
            max_retries: self.max_retries,
            chunk_semantics: self.chunk_semantics,
        })
    }
}
