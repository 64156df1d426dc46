//! High-level client for the chat service REST API.
//!
//! This module provides [`QChatClient`], the entry point for the
//! non-streaming endpoints: chat, session management, file management, and
//! health. For streaming responses, see
//! [`StreamClient`](crate::stream::StreamClient).
//!
//! # Example
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

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{ChunkSemantics, ClientConfig, ClientConfigBuilder, SessionId};
use crate::protocol::{
    ChatReply, FileEntry, FileUploadReply, HealthStatus, SessionCreated, SessionDetails,
};
use crate::stream::StreamClient;
use crate::{Error, Result};

/// A client for the chat service REST API.
///
/// Holds the configuration and a pooled HTTP client; `Clone` shares both.
/// Construct one explicitly where a chat turn is initiated — there is no
/// process-wide instance.
///
/// Every request is bounded by the configured timeout. Connection-level
/// failures retry with exponential backoff (1 s, 2 s, 4 s, ...) up to
/// `max_retries`; non-success statuses surface immediately as
/// [`Error::HttpStatus`].
#[derive(Debug, Clone)]
pub struct QChatClient {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl QChatClient {
    /// Create a client with the default configuration.
    pub fn new() -> Result<Self> {
        Ok(Self::with_config(ClientConfig::builder().build()?))
    }

    /// Create a client with the given configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }

    /// Create a builder for configuring a new client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get a reference to the client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a streaming reader sharing this client's configuration.
    pub fn stream_client(&self) -> StreamClient {
        StreamClient::from_shared(Arc::clone(&self.config))
    }

    // -------------------------------------------------------------------------
    // Chat
    // -------------------------------------------------------------------------

    /// Send a message and wait for the complete response.
    pub async fn send_message(&self, session_id: &SessionId, message: &str) -> Result<ChatReply> {
        let body = serde_json::json!({ "session_id": session_id, "message": message });
        let response = self
            .execute(self.http.post(self.url("/api/v1/chat")).json(&body))
            .await?;
        Self::decode(response).await
    }

    // -------------------------------------------------------------------------
    // Sessions
    // -------------------------------------------------------------------------

    /// Create a new chat session.
    pub async fn create_session(&self) -> Result<SessionCreated> {
        let response = self
            .execute(self.http.post(self.url("/api/v1/sessions")))
            .await?;
        Self::decode(response).await
    }

    /// Get details of an existing session.
    pub async fn get_session(&self, session_id: &SessionId) -> Result<SessionDetails> {
        let response = self
            .execute(
                self.http
                    .get(self.url(&format!("/api/v1/sessions/{session_id}"))),
            )
            .await?;
        Self::decode(response).await
    }

    /// List all sessions.
    pub async fn list_sessions(&self) -> Result<Vec<SessionDetails>> {
        let response = self
            .execute(self.http.get(self.url("/api/v1/sessions")))
            .await?;
        Self::decode(response).await
    }

    /// Delete a session and its workspace.
    pub async fn delete_session(&self, session_id: &SessionId) -> Result<()> {
        self.execute(
            self.http
                .delete(self.url(&format!("/api/v1/sessions/{session_id}"))),
        )
        .await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Files
    // -------------------------------------------------------------------------

    /// Upload a file into a session's workspace.
    ///
    /// Multipart bodies cannot be replayed, so uploads are not retried.
    pub async fn upload_file(
        &self,
        session_id: &SessionId,
        file_name: impl Into<String>,
        contents: Vec<u8>,
    ) -> Result<FileUploadReply> {
        let part = reqwest::multipart::Part::bytes(contents).file_name(file_name.into());
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .execute(
                self.http
                    .post(self.url(&format!("/api/v1/sessions/{session_id}/files")))
                    .multipart(form),
            )
            .await?;
        Self::decode(response).await
    }

    /// Download a file from a session's workspace.
    pub async fn download_file(&self, session_id: &SessionId, path: &str) -> Result<Bytes> {
        let encoded = urlencoding::encode(path);
        let response = self
            .execute(
                self.http
                    .get(self.url(&format!("/api/v1/sessions/{session_id}/files/{encoded}"))),
            )
            .await?;
        Ok(response.bytes().await?)
    }

    /// List the files in a session's workspace.
    pub async fn list_files(&self, session_id: &SessionId) -> Result<Vec<FileEntry>> {
        let response = self
            .execute(
                self.http
                    .get(self.url(&format!("/api/v1/sessions/{session_id}/files"))),
            )
            .await?;
        Self::decode(response).await
    }

    // -------------------------------------------------------------------------
    // System
    // -------------------------------------------------------------------------

    /// Query the service health endpoint.
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.execute(self.http.get(self.url("/health"))).await?;
        Self::decode(response).await
    }

    // -------------------------------------------------------------------------
    // Request pipeline
    // -------------------------------------------------------------------------

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let timeout = self.config.timeout();
        match tokio::time::timeout(timeout, self.execute_with_retry(request)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(timeout)),
        }
    }

    async fn execute_with_retry(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response> {
        let mut attempt: u32 = 0;
        let mut current = request;
        loop {
            let replay = current.try_clone();
            match self.dispatch(current).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    // Streaming bodies cannot be replayed.
                    let Some(next) = replay else { return Err(err) };
                    if !err.is_retryable() || attempt >= self.config.max_retries() {
                        return Err(err);
                    }
                    attempt += 1;
                    debug!(attempt, error = %err, "request failed, retrying");
                    tokio::time::sleep(backoff_delay(attempt)).await;
                    current = next;
                }
            }
        }
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Backoff before retry `attempt` (1-based): 1 s, 2 s, 4 s, ... capped.
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << (attempt - 1).min(6))
}

/// Builder for [`QChatClient`].
///
/// This wraps [`ClientConfigBuilder`] and builds directly into a client.
///
/// # Example
///
/// ```ignore
/// let client = QChatClient::builder()
///     .base_url("http://chat.internal:8080")
///     .max_retries(5)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    inner: ClientConfigBuilder,
}

impl ClientBuilder {
    /// Create a new client builder with default settings.
    pub fn new() -> Self {
        Self {
            inner: ClientConfigBuilder::default(),
        }
    }

    /// Set the service base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.base_url(url);
        self
    }

    /// Set the overall-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Set the delay between failed stream connection attempts.
    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.inner = self.inner.retry_interval(interval);
        self
    }

    /// Set the maximum number of additional connection attempts.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.inner = self.inner.max_retries(retries);
        self
    }

    /// Set how chunk payloads are accumulated by collection helpers.
    pub fn chunk_semantics(mut self, semantics: ChunkSemantics) -> Self {
        self.inner = self.inner.chunk_semantics(semantics);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<QChatClient> {
        let config = self.inner.build()?;
        Ok(QChatClient::with_config(config))
    }
}
