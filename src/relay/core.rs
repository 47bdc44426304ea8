//! Registration handling and per-frame relay.
//!
//! # Example
//!
//! ```no_run
//! use arflow_relay::{DecodedFrame, Relay, RegisterRequest};
//!
//! # async fn example(request: RegisterRequest, frame: DecodedFrame) -> arflow_relay::Result<()> {
//! let mut relay = Relay::builder().connect().await?;
//!
//! relay.register(&request).await?;
//! relay.relay_frame(&frame).await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use glam::DVec3;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::geometry::{convert, flatten_row_major, pose_from_rows, translation_matrix, translation_of};
use crate::protocol::{DecodedFrame, FrameMetadata, OutboundMessage, RegisterRequest, SessionEvent};
use crate::transport::{Connection, MessageSink};

use super::builder::RelayBuilder;
use super::config::RelayConfig;
use super::consumer::drive;
use super::state::{Intrinsics, SessionState};

// ============================================================================
// Relay
// ============================================================================

/// Relays one capture session to the visualization consumer.
///
/// All operations take `&mut self`: callbacks are handled one at a time and
/// the frame metadata is updated in place between sends.
pub struct Relay<S = Connection> {
    /// Outbound message sink.
    sink: S,
    /// Current session, `None` until the first successful registration.
    session: Option<SessionState>,
    /// Metadata attached to every frame.
    metadata: FrameMetadata,
    /// Frames delivered to the sink.
    frames_sent: u64,
}

impl<S> fmt::Debug for Relay<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay")
            .field("session", &self.session.as_ref().map(SessionState::id))
            .field("frames_sent", &self.frames_sent)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Relay - Construction
// ============================================================================

impl Relay<Connection> {
    /// Creates a builder for a relay over a WebSocket connection.
    #[inline]
    #[must_use]
    pub fn builder() -> RelayBuilder {
        RelayBuilder::new()
    }

    /// Connects using `config`.
    ///
    /// # Errors
    ///
    /// See [`RelayBuilder::connect`].
    pub async fn connect(config: RelayConfig) -> Result<Self> {
        RelayBuilder::new().config(config).connect().await
    }
}

impl<S: MessageSink> Relay<S> {
    /// Creates a relay over an already open sink.
    #[must_use]
    pub fn with_sink(sink: S, metadata: FrameMetadata) -> Self {
        Self {
            sink,
            session: None,
            metadata,
            frames_sent: 0,
        }
    }
}

// ============================================================================
// Relay - Accessors
// ============================================================================

impl<S> Relay<S> {
    /// Returns the current session, if registered.
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Returns `true` once a registration has completed.
    #[inline]
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the frame metadata as last sent.
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &FrameMetadata {
        &self.metadata
    }

    /// Returns the number of frames delivered to the sink.
    #[inline]
    #[must_use]
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Returns the sink.
    #[inline]
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the sink mutably.
    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the relay, returning the sink.
    #[inline]
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

// ============================================================================
// Relay - Session Handling
// ============================================================================

impl<S: MessageSink> Relay<S> {
    /// Handles a session registration.
    ///
    /// Converts the object position, scales the intrinsics, replaces the
    /// session state and sends the `initialize` message.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedRegistration`] if the object position is not three
    ///   floats; the previous session is kept
    /// - Transport errors if the `initialize` send fails; the new session is
    ///   already in place and frames keep flowing
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<()> {
        let position = parse_object_position(&request.object_position)?;
        let object_position = translation_of(&convert(&translation_matrix(position)));

        let intrinsics = Intrinsics::scaled(&request.camera_intrinsics, &request.camera_color);

        // Both streams go out at the depth resolution.
        let resolution = request.camera_depth.resolution();

        let session = SessionState::new(intrinsics, resolution, object_position);
        info!(
            session_id = %session.id(),
            width = resolution.0,
            height = resolution.1,
            "Client registered"
        );

        self.metadata.obj_position = object_position.to_array();
        self.session = Some(session);

        let message = OutboundMessage::Initialize {
            rgb_resolution: resolution,
            depth_resolution: resolution,
            intrinsics: intrinsics.to_wire(),
        };
        let text = message.to_json()?;

        debug!(kind = message.kind(), bytes = text.len(), "Sending");
        self.sink.send_text(text).await
    }

    /// Converts, encodes and sends one frame.
    ///
    /// # Errors
    ///
    /// - [`Error::NotRegistered`] if no registration has completed
    /// - Serialization or transport errors; the frame is lost and the relay
    ///   stays usable
    pub async fn relay_frame(&mut self, frame: &DecodedFrame) -> Result<()> {
        let resolution = self
            .session
            .as_ref()
            .map(SessionState::rgb_resolution)
            .ok_or(Error::NotRegistered)?;

        // The consumer reads pose4x4 column-major; the transpose is required.
        let pose = convert(&pose_from_rows(&frame.transform)).transpose();

        self.metadata.pose4x4 = Some(flatten_row_major(&pose));
        self.metadata.resolution = Some(resolution);
        self.metadata.depth_resolution = Some(resolution);

        let text =
            OutboundMessage::frame(&self.metadata, resolution, &frame.color, &frame.depth).to_json()?;

        trace!(
            color_bytes = frame.color.len(),
            depth_bytes = frame.depth.len(),
            payload_bytes = text.len(),
            "Frame encoded"
        );

        self.sink.send_text(text).await?;
        self.frames_sent += 1;

        Ok(())
    }

    /// Closes the sink.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the close handshake fails.
    pub async fn close(&mut self) -> Result<()> {
        self.sink.close().await
    }

    /// Handles events until the sender side is dropped, then closes the sink.
    ///
    /// This is the relay's run entry point.
    ///
    /// # Errors
    ///
    /// Only a failure to close the sink is returned; per-event failures are
    /// logged and skipped.
    pub async fn run(mut self, events: mpsc::Receiver<SessionEvent>) -> Result<()> {
        let handled = drive(&mut self, events).await;

        info!(handled, frames_sent = self.frames_sent, "Session ended");
        self.close().await
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Parses `"x,y,z"` into a vector.
fn parse_object_position(input: &str) -> Result<DVec3> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();

    let &[x, y, z] = parts.as_slice() else {
        return Err(Error::malformed_registration(
            input,
            format!("expected 3 components, got {}", parts.len()),
        ));
    };

    let parse = |part: &str| -> Result<f64> {
        match part.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(Error::malformed_registration(
                input,
                format!("component {part:?} is not finite"),
            )),
            Err(e) => Err(Error::malformed_registration(
                input,
                format!("component {part:?}: {e}"),
            )),
        }
    };

    Ok(DVec3::new(parse(x)?, parse(y)?, parse(z)?))
}

// ============================================================================
// Tests
// ============================================================================
