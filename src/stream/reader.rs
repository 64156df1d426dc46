//! The streaming response reader.
//!
//! This module provides [`StreamClient`], which owns one in-flight
//! streaming chat exchange: it opens the request, frames the response body
//! into lines, parses application-level events, and drives caller
//! callbacks, with bounded connection retries, an overall timeout, and
//! silent cancellation.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::{ChunkSemantics, ClientConfig, ReadyState, SessionId};
use crate::protocol::frame::{parse_line, DataLine, Frame};
use crate::stream::line::LineDecoder;
use crate::transport::{HttpTransport, StreamRequest, Transport};
use crate::{Error, Result};

/// A client for one streaming chat exchange at a time.
///
/// Starting a stream spawns a single read-loop task; starting another
/// implicitly cancels the first. The exchange resolves to exactly one
/// terminal callback — completion or error — unless [`stop`](Self::stop)
/// preempts it, in which case neither fires.
///
/// # Callbacks
///
/// - `on_data(String)`: zero or more times, strictly before the terminal
///   callback, one call per chunk in arrival order, payload passed through
///   verbatim and never empty.
/// - `on_complete()`: the stream ended with a `done` frame, or the socket
///   closed without a terminal frame.
/// - `on_error(Error)`: HTTP failure, empty body, exhausted retries,
///   server error frame, mid-stream read failure, or timeout.
///
/// # Example
///
/// ```ignore
/// use libqchat::{ClientConfig, StreamClient};
///
/// let mut client = StreamClient::new(ClientConfig::builder().build()?);
/// client.start_stream(
///     "session-123",
///     "What is 2+2?",
///     |text| print!("{text}"),
///     || println!(),
///     |err| eprintln!("stream failed: {err}"),
/// );
/// ```
pub struct StreamClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    state: Arc<AtomicU8>,
    task: Option<JoinHandle<()>>,
}

impl StreamClient {
    /// Create a client speaking HTTP to the configured service.
    pub fn new(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(&config);
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self::from_parts(Arc::new(config), transport)
    }

    /// Create a client sharing an already-built configuration.
    pub(crate) fn from_shared(config: Arc<ClientConfig>) -> Self {
        let transport = Arc::new(HttpTransport::new(&config));
        Self::from_parts(config, transport)
    }

    fn from_parts(config: Arc<ClientConfig>, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            state: Arc::new(AtomicU8::new(ReadyState::Closed as u8)),
            task: None,
        }
    }

    /// Get a reference to the client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start a streaming exchange, cancelling any prior one.
    ///
    /// Returns immediately; the exchange runs on a spawned task. Whether
    /// the message may be empty is the caller's concern — it is sent as-is.
    pub fn start_stream<D, C, E>(
        &mut self,
        session_id: impl Into<SessionId>,
        message: impl Into<String>,
        mut on_data: D,
        on_complete: C,
        on_error: E,
    ) where
        D: FnMut(String) + Send + 'static,
        C: FnOnce() + Send + 'static,
        E: FnOnce(Error) + Send + 'static,
    {
        self.stop();

        let request = StreamRequest::new(session_id, message);
        let transport = Arc::clone(&self.transport);
        let state = Arc::clone(&self.state);
        let timeout = self.config.timeout();
        let retry_interval = self.config.retry_interval();
        let max_retries = self.config.max_retries();

        state.store(ReadyState::Open as u8, Ordering::SeqCst);
        debug!(session_id = %request.session_id, "starting chat stream");

        self.task = Some(tokio::spawn(async move {
            let outcome = tokio::time::timeout(
                timeout,
                run_exchange(
                    transport.as_ref(),
                    &request,
                    retry_interval,
                    max_retries,
                    &mut on_data,
                ),
            )
            .await;

            // The session closes before its terminal callback runs.
            state.store(ReadyState::Closed as u8, Ordering::SeqCst);
            match outcome {
                Ok(Ok(())) => {
                    debug!(session_id = %request.session_id, "chat stream completed");
                    on_complete();
                }
                Ok(Err(err)) => {
                    debug!(session_id = %request.session_id, error = %err, "chat stream failed");
                    on_error(err);
                }
                Err(_) => {
                    debug!(session_id = %request.session_id, "chat stream timed out");
                    on_error(Error::Timeout(timeout));
                }
            }
        }));
    }

    /// Stop the in-flight exchange, if any.
    ///
    /// Idempotent. Cancels the request and read loop immediately; no
    /// callback fires as a result. The client stays ready for a new
    /// [`start_stream`](Self::start_stream) call.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.state.store(ReadyState::Closed as u8, Ordering::SeqCst);
    }

    /// Check if a session is currently open.
    pub fn is_connected(&self) -> bool {
        self.ready_state().is_open()
    }

    /// Current connection state.
    pub fn ready_state(&self) -> ReadyState {
        ReadyState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Stream a message and collect the response into a single string.
    ///
    /// Chunks accumulate per the configured
    /// [`ChunkSemantics`](crate::ChunkSemantics): appended under `Delta`,
    /// last-one-wins under `Snapshot`.
    pub async fn collect(
        &mut self,
        session_id: impl Into<SessionId>,
        message: impl Into<String>,
    ) -> Result<String> {
        let semantics = self.config.chunk_semantics();
        let collected = Arc::new(Mutex::new(String::new()));
        let sink = Arc::clone(&collected);
        let (tx, mut rx) = mpsc::channel::<Result<()>>(1);
        let done_tx = tx.clone();

        self.start_stream(
            session_id,
            message,
            move |text| {
                let mut buf = sink.lock().expect("collector lock");
                match semantics {
                    ChunkSemantics::Delta => buf.push_str(&text),
                    ChunkSemantics::Snapshot => *buf = text,
                }
            },
            move || {
                let _ = done_tx.try_send(Ok(()));
            },
            move |err| {
                let _ = tx.try_send(Err(err));
            },
        );

        match rx.recv().await {
            Some(Ok(())) => Ok(std::mem::take(
                &mut *collected.lock().expect("collector lock"),
            )),
            Some(Err(err)) => Err(err),
            None => Err(Error::Cancelled),
        }
    }
}

impl Drop for StreamClient {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Drive one exchange to its terminal outcome.
///
/// Connection attempts retry on network-class errors only, bounded by
/// `max_retries` and spaced by `retry_interval`; everything after a
/// response is obtained is final. `Ok(())` means a `done` frame arrived or
/// the stream ended cleanly without one.
async fn run_exchange(
    transport: &dyn Transport,
    request: &StreamRequest,
    retry_interval: Duration,
    max_retries: u32,
    on_data: &mut (dyn FnMut(String) + Send),
) -> Result<()> {
    let mut attempt: u32 = 0;
    let connection = loop {
        match transport.connect(request).await {
            Ok(connection) => break connection,
            Err(err) if err.is_retryable() && attempt < max_retries => {
                attempt += 1;
                debug!(attempt, max_retries, error = %err, "connection failed, retrying");
                tokio::time::sleep(retry_interval).await;
            }
            Err(err) => return Err(err),
        }
    };

    let Some(mut body) = connection.body else {
        return Err(Error::EmptyBody);
    };

    let mut decoder = LineDecoder::new();
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        for line in decoder.push(&chunk) {
            match parse_line(&line) {
                DataLine::Skip => {}
                DataLine::Text(text) => on_data(text),
                DataLine::Frame(Frame::Session(_)) | DataLine::Frame(Frame::Unknown) => {}
                DataLine::Frame(Frame::Chunk(chunk)) => {
                    if let Some(text) = chunk.text() {
                        on_data(text.to_string());
                    }
                }
                DataLine::Frame(Frame::Done) => return Ok(()),
                DataLine::Frame(Frame::Error(err)) => {
                    return Err(Error::Protocol {
                        message: err.message().to_string(),
                    });
                }
            }
        }
    }

    // Stream ended without a terminal frame: treat as completion.
    Ok(())
}
