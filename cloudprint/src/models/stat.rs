//! Order Statistics Model

use serde::{Deserialize, Serialize};

/// Printed and waiting order counts for one device on one day.
///
/// Built only from `query_device_orders` results, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceOrderStat {
    pub device_sn: String,
    pub order_date: String,
    pub printed_count: u32,
    pub waiting_count: u32,
}

impl DeviceOrderStat {
    pub fn new(
        device_sn: impl Into<String>,
        order_date: impl Into<String>,
        printed_count: u32,
        waiting_count: u32,
    ) -> Self {
        Self {
            device_sn: device_sn.into(),
            order_date: order_date.into(),
            printed_count,
            waiting_count,
        }
    }
}
