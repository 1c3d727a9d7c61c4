//! Query Options

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date filter for order statistics, sent as `yyyy-MM-dd` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOption {
    pub date: Option<String>,
}

impl QueryOption {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on a calendar day.
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date.format("%Y-%m-%d").to_string());
        self
    }

    /// Filter on a preformatted `yyyy-MM-dd` string.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}
