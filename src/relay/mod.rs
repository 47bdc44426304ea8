//! Frame relay pipeline.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Relay`] | Registration handling and per-frame relay |
//! | [`RelayBuilder`] | Fluent construction over a live connection |
//! | [`RelayConfig`] | Endpoint, timeout and metadata template |
//! | [`SessionState`] | Intrinsics and resolution for the current session |
//! | [`SessionConsumer`] | Callback interface for the capture framework |

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder for relay construction.
pub mod builder;

/// Relay configuration.
pub mod config;

/// Capture-session callback interface and dispatch loop.
pub mod consumer;

/// Core relay implementation.
pub mod core;

/// Per-session state.
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::RelayBuilder;
pub use config::{DEFAULT_ENDPOINT, ENDPOINT_ENV, RelayConfig};
pub use consumer::{SessionConsumer, drive};
pub use core::Relay;
pub use state::{Intrinsics, SessionId, SessionState};
