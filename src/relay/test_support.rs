//! In-memory sink for relay tests.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::transport::MessageSink;

// ============================================================================
// RecordingSink
// ============================================================================

/// Records every message; can be told to fail upcoming sends.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    /// Messages successfully sent, in order.
    pub sent: Vec<String>,
    /// Number of upcoming sends to fail.
    pub fail_next: usize,
    /// Set by `close`.
    pub closed: bool,
}

// ============================================================================
// RecordingSink - MessageSink
// ============================================================================

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send_text(&mut self, text: String) -> Result<()> {
        if self.closed {
            return Err(Error::ConnectionClosed);
        }
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(Error::connection("injected send failure"));
        }
        self.sent.push(text);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
