//! Outbound WebSocket connection to the consumer.
//!
//! The relay holds one connection for its whole life. There is no event loop
//! and no queue: every send is a direct awaited write, so a stalled consumer
//! stalls the caller. Incoming messages from the consumer are never read.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use futures_util::SinkExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, trace};
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// MessageSink
// ============================================================================

/// Destination for serialized relay messages.
///
/// Implemented by [`Connection`]; tests substitute in-memory sinks.
#[async_trait]
pub trait MessageSink: Send {
    /// Writes one text message.
    async fn send_text(&mut self, text: String) -> Result<()>;

    /// Closes the sink. Further sends fail.
    async fn close(&mut self) -> Result<()>;
}

// ============================================================================
// Connection
// ============================================================================

/// WebSocket client connection to the visualization consumer.
pub struct Connection {
    /// Open stream, `None` once closed.
    stream: Option<WebSocketStream<MaybeTlsStream<TcpStream>>>,
    /// Endpoint this connection was opened against.
    url: Url,
}

impl Connection {
    /// Opens a connection to `url`.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionTimeout`] if the handshake does not finish in time
    /// - [`Error::Connection`] if the endpoint refuses or the upgrade fails
    pub async fn connect(url: &Url, connect_timeout: Duration) -> Result<Self> {
        let (stream, _response) = timeout(connect_timeout, connect_async(url.as_str()))
            .await
            .map_err(|_| Error::connection_timeout(connect_timeout.as_millis() as u64))?
            .map_err(|e| Error::connection(format!("{url}: {e}")))?;

        info!(%url, "Connected to consumer");

        Ok(Self {
            stream: Some(stream),
            url: url.clone(),
        })
    }

    /// Returns the endpoint URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns `true` until [`MessageSink::close`] is called.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

#[async_trait]
impl MessageSink for Connection {
    async fn send_text(&mut self, text: String) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::ConnectionClosed)?;
        let len = text.len();

        stream.send(Message::Text(text.into())).await?;

        trace!(bytes = len, "Message sent");
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            stream.close(None).await?;
            debug!(url = %self.url, "Connection closed");
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
