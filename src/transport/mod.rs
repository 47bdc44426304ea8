//! WebSocket transport layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Relay (Rust)   │                              │  Visualization  │
//! │                 │         WebSocket            │  Consumer       │
//! │  Connection     │─────────────────────────────►│                 │
//! │                 │     fixed endpoint URL       │  WebSocket      │
//! │                 │                              │  Server         │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `Connection::connect` - Open once when the relay is built
//! 2. `MessageSink::send_text` - One awaited write per message
//! 3. `MessageSink::close` - Close frame when the session ends

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket client connection.
pub mod connection;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{Connection, MessageSink};
