//! HTTP transport over reqwest.

use async_trait::async_trait;
use futures::TryStreamExt;

use super::{Connection, StreamRequest, Transport};
use crate::config::ClientConfig;
use crate::{Error, Result};

/// Path of the streaming chat endpoint.
pub(crate) const STREAM_PATH: &str = "/api/v1/chat/stream";

/// Production [`Transport`] speaking HTTP to the chat service.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport targeting the configured service.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a transport reusing an existing HTTP client.
    pub fn with_client(http: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint(STREAM_PATH),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn connect(&self, request: &StreamRequest) -> Result<Connection> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;

        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }

        let body = response.bytes_stream().map_err(Error::from);
        Ok(Connection {
            body: Some(Box::pin(body)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_built_from_base_url() {
        let config = ClientConfig::builder()
            .base_url("http://chat.internal:9000/")
            .build()
            .unwrap();
        let transport = HttpTransport::new(&config);
        assert_eq!(
            transport.endpoint,
            "http://chat.internal:9000/api/v1/chat/stream"
        );
    }

    #[test]
    fn http_transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpTransport>();
    }
}
