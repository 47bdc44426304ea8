//! Message types on both sides of the relay.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `RegisterRequest` | Capture → Relay | Session handshake |
//! | `DecodedFrame` | Capture → Relay | One color/depth/pose sample |
//! | `OutboundMessage::Initialize` | Relay → Consumer | Resolution and intrinsics |
//! | `OutboundMessage::Frame` | Relay → Consumer | Encoded frame with metadata |

// ============================================================================
// Submodules
// ============================================================================

/// Inbound capture-session events.
pub mod event;

/// Outbound consumer messages.
pub mod message;

// ============================================================================
// Re-exports
// ============================================================================

pub use event::{
    CameraIntrinsics, ColorStream, DecodedFrame, DepthStream, RegisterRequest, SessionEvent,
};
pub use message::{FrameMetadata, OutboundMessage};
