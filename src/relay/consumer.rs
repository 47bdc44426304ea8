//! Capture-session callback interface.
//!
//! The capture framework calls [`SessionConsumer::on_register`] once and
//! [`SessionConsumer::on_frame`] for each decoded frame, one call at a time.
//! Neither method returns an error: relay failures are logged here and never
//! reach the capture framework.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::protocol::{DecodedFrame, RegisterRequest, SessionEvent};
use crate::transport::MessageSink;

use super::core::Relay;

// ============================================================================
// SessionConsumer
// ============================================================================

/// Receives capture-session callbacks.
#[async_trait]
pub trait SessionConsumer: Send {
    /// Called once when a client registers.
    async fn on_register(&mut self, request: RegisterRequest);

    /// Called for each decoded frame.
    async fn on_frame(&mut self, frame: DecodedFrame);
}

#[async_trait]
impl<S: MessageSink> SessionConsumer for Relay<S> {
    async fn on_register(&mut self, request: RegisterRequest) {
        if let Err(e) = self.register(&request).await {
            if e.is_session_error() {
                error!(error = %e, "Registration rejected");
            } else {
                warn!(error = %e, "Consumer was not initialized");
            }
        }
    }

    async fn on_frame(&mut self, frame: DecodedFrame) {
        if let Err(e) = self.relay_frame(&frame).await {
            warn!(error = %e, "Frame dropped");
        }
    }
}

// ============================================================================
// Event Dispatch
// ============================================================================

/// Dispatches events to `consumer` in arrival order until the channel closes.
///
/// Each callback completes before the next event is taken. Returns the number
/// of events handled.
pub async fn drive<C>(consumer: &mut C, mut events: mpsc::Receiver<SessionEvent>) -> usize
where
    C: SessionConsumer + ?Sized,
{
    let mut handled = 0;

    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Register(request) => consumer.on_register(request).await,
            SessionEvent::Frame(frame) => consumer.on_frame(frame).await,
        }
        handled += 1;
    }

    handled
}

// ============================================================================
// Tests
// ============================================================================
