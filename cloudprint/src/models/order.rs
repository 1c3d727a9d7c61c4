//! Print Order Model

use serde::{Deserialize, Serialize};

/// One print job submitted to a cloud platform.
///
/// A successful print call writes the platform-assigned `id` back into the
/// order; `query_order` refreshes the printed flag on the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Platform-assigned job id, filled in by a successful print call.
    pub id: Option<String>,
    pub content: String,
    /// Epoch seconds after which the job should no longer print. Zero means
    /// no expiry.
    pub expired_epoch_second: i64,
    /// Submission timestamp, as the platform reports it (opaque string).
    pub create_time: Option<String>,
    /// Print timestamp, as the platform reports it (opaque string).
    pub print_time: Option<String>,
    copies: u32,
    printed: bool,
}

impl Order {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            expired_epoch_second: 0,
            create_time: None,
            print_time: None,
            copies: 1,
            printed: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Number of copies to print, clamped to at least one.
    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies = copies.max(1);
        self
    }

    pub fn with_expiry(mut self, epoch_second: i64) -> Self {
        self.expired_epoch_second = epoch_second;
        self
    }

    pub fn copies(&self) -> u32 {
        self.copies
    }

    pub fn is_printed(&self) -> bool {
        self.printed
    }

    pub fn mark_printed(&mut self) {
        self.printed = true;
    }

    pub fn mark_waiting(&mut self) {
        self.printed = false;
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new("")
    }
}
