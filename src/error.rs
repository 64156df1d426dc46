use std::time::Duration;

/// Errors that can occur when using libqchat.
///
/// Errors are organized by category:
/// - Configuration errors: detected at `build()` time
/// - Connection errors: failures before a response was obtained (retryable)
/// - HTTP errors: non-success responses from the service
/// - Protocol errors: unexpected or malformed stream content
/// - Runtime errors: failures during execution
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // -------------------------------------------------------------------------
    // Configuration errors (detected at build() time)
    // -------------------------------------------------------------------------
    /// Invalid configuration provided to builder.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -------------------------------------------------------------------------
    // Connection errors
    // -------------------------------------------------------------------------
    /// Connection-level failure before a response was obtained.
    ///
    /// This is the only retryable error kind: the stream reader retries it
    /// up to the configured `max_retries` before surfacing it.
    #[error("connection failed: {message}")]
    Network {
        message: String,
        /// The original cause, when one is available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // -------------------------------------------------------------------------
    // HTTP errors
    // -------------------------------------------------------------------------
    /// The service replied with a non-success status.
    ///
    /// Not retried: a response was obtained, so the request reached the
    /// service and repeating it verbatim would fail the same way.
    #[error("server returned HTTP {status}: {message}")]
    HttpStatus {
        status: u16,
        /// Server-provided error detail, or the canonical status text.
        message: String,
        /// Raw response body, when it was readable.
        body: Option<String>,
    },

    /// The response carried no readable body.
    #[error("response body was empty")]
    EmptyBody,

    // -------------------------------------------------------------------------
    // Protocol errors
    // -------------------------------------------------------------------------
    /// Failed to parse JSON from a service response.
    #[error("failed to parse JSON: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The stream carried an explicit error frame.
    #[error("stream error: {message}")]
    Protocol { message: String },

    // -------------------------------------------------------------------------
    // Runtime errors
    // -------------------------------------------------------------------------
    /// Request exceeded the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Request was cancelled by stopping or dropping the reader.
    ///
    /// Never delivered through callbacks; cancellation is silent.
    #[error("request cancelled")]
    Cancelled,
}

/// A specialized Result type for libqchat operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection-level error without an underlying cause.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Build an [`Error::HttpStatus`] from a non-success response.
    ///
    /// Reads the body best-effort and extracts the server's `error` /
    /// `error_message` detail when the body is JSON.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.ok().filter(|b| !b.is_empty());
        let detail = body
            .as_deref()
            .and_then(|b| serde_json::from_str::<serde_json::Value>(b).ok())
            .and_then(|v| {
                v.get("error")
                    .or_else(|| v.get("error_message"))
                    .and_then(|e| e.as_str())
                    .map(str::to_owned)
            });

        Self::HttpStatus {
            status: status.as_u16(),
            message: detail.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            }),
            body,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only connection-level failures are: HTTP status errors, protocol
    /// errors, and timeouts are final for the call that produced them.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network { .. })
    }

    /// Check if this error is the overall-call timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonParse {
            message: err.to_string(),
            source: err,
        }
    }
}
