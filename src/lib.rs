//! ARFlow relay - forwards AR capture frames to a visualization consumer.
//!
//! A capture framework delivers one registration and then a stream of
//! decoded frames (color bytes, depth bytes, camera pose). The relay turns
//! them into JSON messages and writes them to a single WebSocket connection.
//!
//! # Architecture
//!
//! - **Capture side**: calls [`SessionConsumer`] methods, one at a time
//! - **Relay**: converts poses to right-handed space, base64-encodes buffers
//! - **Consumer side**: receives `initialize` once, then `frame` messages
//!
//! # Quick Start
//!
//! ```no_run
//! use arflow_relay::{Relay, Result, SessionEvent};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let relay = Relay::builder()
//!         .endpoint("ws://127.0.0.1:5034/websocket")
//!         .connect()
//!         .await?;
//!
//!     let (events, rx) = mpsc::channel::<SessionEvent>(16);
//!     // Hand `events` to the capture framework...
//!     # drop(events);
//!
//!     relay.run(rx).await
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error types and [`Result`] alias |
//! | [`geometry`] | Handedness conversion for 4×4 transforms |
//! | [`protocol`] | Inbound events and outbound messages |
//! | [`relay`] | Registration, frame relay, configuration |
//! | [`transport`] | WebSocket connection |

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
pub mod error;

/// Handedness conversion.
pub mod geometry;

/// Message types.
pub mod protocol;

/// Frame relay pipeline.
pub mod relay;

/// WebSocket transport layer.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Error types
pub use error::{Error, Result};

// Protocol types
pub use protocol::{
    CameraIntrinsics, ColorStream, DecodedFrame, DepthStream, FrameMetadata, OutboundMessage,
    RegisterRequest, SessionEvent,
};

// Relay types
pub use relay::{
    Intrinsics, Relay, RelayBuilder, RelayConfig, SessionConsumer, SessionId, SessionState,
};

// Transport types
pub use transport::{Connection, MessageSink};
