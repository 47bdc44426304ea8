//! Relay configuration.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use arflow_relay::RelayConfig;
//!
//! let config = RelayConfig::new()
//!     .with_endpoint("ws://127.0.0.1:5034/websocket")
//!     .with_connect_timeout(Duration::from_secs(5));
//!
//! let url = config.endpoint_url()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::protocol::FrameMetadata;

// ============================================================================
// Constants
// ============================================================================

/// Consumer endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "ws://mountain-lion.catshome:5034/websocket";

/// Environment variable overriding the endpoint in [`RelayConfig::from_env`].
pub const ENDPOINT_ENV: &str = "ARFLOW_RELAY_URL";

/// Default timeout for opening the consumer connection.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// RelayConfig
// ============================================================================

/// Relay configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    /// Consumer WebSocket endpoint.
    pub endpoint: String,

    /// Maximum time to open the connection.
    pub connect_timeout: Duration,

    /// Metadata template sent with every frame.
    pub metadata: FrameMetadata,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl RelayConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            metadata: FrameMetadata::default(),
        }
    }

    /// Creates a configuration, taking the endpoint from
    /// `ARFLOW_RELAY_URL` when it is set.
    #[must_use]
    pub fn from_env() -> Self {
        match env::var(ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => Self::new().with_endpoint(endpoint.trim()),
            _ => Self::new(),
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl RelayConfig {
    /// Sets the consumer endpoint.
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the connect timeout.
    #[inline]
    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Replaces the metadata template.
    #[inline]
    #[must_use]
    pub fn with_metadata(mut self, metadata: FrameMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl RelayConfig {
    /// Parses the endpoint.
    ///
    /// # Errors
    ///
    /// - [`Error::Url`] if the endpoint is not a URL
    /// - [`Error::Config`] if the scheme is not `ws` or `wss`
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint)?;

        match url.scheme() {
            "ws" | "wss" => Ok(url),
            scheme => Err(Error::config(format!(
                "Endpoint must use ws:// or wss://, got {scheme}:// ({})",
                self.endpoint
            ))),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is invalid or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;

        if self.connect_timeout.is_zero() {
            return Err(Error::config("Connect timeout must be greater than zero"));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
