//! Builder pattern for relay construction.
//!
//! # Example
//!
//! ```no_run
//! use arflow_relay::Relay;
//!
//! # async fn example() -> arflow_relay::Result<()> {
//! let relay = Relay::builder()
//!     .endpoint("ws://127.0.0.1:5034/websocket")
//!     .connect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::protocol::FrameMetadata;
use crate::transport::Connection;

use super::config::RelayConfig;
use super::core::Relay;

// ============================================================================
// RelayBuilder
// ============================================================================

/// Builder for a [`Relay`] over a live [`Connection`].
///
/// Use [`Relay::builder()`] to create a new builder.
#[derive(Debug, Default, Clone)]
pub struct RelayBuilder {
    /// Accumulated configuration.
    config: RelayConfig,
}

// ============================================================================
// RelayBuilder Implementation
// ============================================================================

impl RelayBuilder {
    /// Creates a builder with default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    #[inline]
    #[must_use]
    pub fn config(mut self, config: RelayConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the consumer endpoint.
    #[inline]
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config = self.config.with_endpoint(endpoint);
        self
    }

    /// Sets the connect timeout.
    #[inline]
    #[must_use]
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.config = self.config.with_connect_timeout(connect_timeout);
        self
    }

    /// Replaces the metadata template.
    #[inline]
    #[must_use]
    pub fn metadata_template(mut self, metadata: FrameMetadata) -> Self {
        self.config = self.config.with_metadata(metadata);
        self
    }

    /// Validates the configuration and opens the consumer connection.
    ///
    /// A relay that cannot connect is never built.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Config`] / [`crate::Error::Url`] for a bad endpoint
    /// - [`crate::Error::Connection`] / [`crate::Error::ConnectionTimeout`] if
    ///   the consumer cannot be reached
    pub async fn connect(self) -> Result<Relay<Connection>> {
        self.config.validate()?;
        let url = self.config.endpoint_url()?;

        debug!(%url, timeout_ms = self.config.connect_timeout.as_millis() as u64, "Connecting relay");

        let connection = Connection::connect(&url, self.config.connect_timeout).await?;
        Ok(Relay::with_sink(connection, self.config.metadata))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;
    use crate::relay::config::DEFAULT_ENDPOINT;

    #[test]
    fn test_new_uses_default_config() {
        let builder = RelayBuilder::new();
        assert_eq!(builder.config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_setters_update_config() {
        let metadata = FrameMetadata {
            image: "live.jpg".to_string(),
            ..FrameMetadata::default()
        };
        let builder = RelayBuilder::new()
            .endpoint("ws://127.0.0.1:1/websocket")
            .connect_timeout(Duration::from_millis(250))
            .metadata_template(metadata.clone());

        assert_eq!(builder.config.endpoint, "ws://127.0.0.1:1/websocket");
        assert_eq!(builder.config.connect_timeout, Duration::from_millis(250));
        assert_eq!(builder.config.metadata, metadata);
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_endpoint() {
        let result = RelayBuilder::new().endpoint("http://127.0.0.1:1").connect().await;
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_connect_fails_without_consumer() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind should succeed");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        let result = RelayBuilder::new()
            .endpoint(format!("ws://127.0.0.1:{port}/websocket"))
            .connect_timeout(Duration::from_secs(5))
            .connect()
            .await;

        assert!(result.is_err_and(|e| e.is_connection_error()));
    }

    #[tokio::test]
    async fn test_connect_times_out_when_handshake_stalls() {
        // Accepted by the kernel backlog but never answered.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind should succeed");
        let port = listener.local_addr().expect("local addr").port();

        let result = RelayBuilder::new()
            .endpoint(format!("ws://127.0.0.1:{port}/websocket"))
            .connect_timeout(Duration::from_millis(200))
            .connect()
            .await;

        assert!(matches!(result, Err(Error::ConnectionTimeout { timeout_ms: 200 })));
        drop(listener);
    }
}
