//! The vendor-neutral contract every cloud adapter fulfils

use async_trait::async_trait;

use crate::error::CloudResult;
use crate::models::{Device, DeviceOrderStat, Order, QueryOption};

/// One typed surface over all supported cloud print platforms.
///
/// Callers hold a `Box<dyn CloudApi>` (or a concrete adapter) and never
/// touch vendor parameter names, signatures or reply envelopes. Operations
/// that the platform acknowledges without returning data come back as
/// `CloudResult<()>`; a vendor-side rejection surfaces as
/// [`CloudError::Vendor`](crate::CloudError::Vendor) with the platform's
/// own message.
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// Register a printer under the account.
    async fn add_device(&self, device: &Device) -> CloudResult<()>;

    /// Remove a printer from the account.
    async fn delete_device(&self, device: &Device) -> CloudResult<()>;

    /// Refresh `device` in place with the platform's view of it.
    ///
    /// At minimum the online flag and working status are updated; vendors
    /// that report more (name, SIM card number, cutter mode) fill those
    /// fields too.
    async fn query_device(&self, device: &mut Device) -> CloudResult<()>;

    /// Push local device fields (name and similar) to the platform.
    async fn update_device(&self, device: &Device) -> CloudResult<()>;

    /// Print a receipt order on `device`.
    ///
    /// On success the platform's order id is written into `order`.
    async fn print_msg_order(&self, device: &Device, order: &mut Order) -> CloudResult<()>;

    /// Print a label order on `device`.
    ///
    /// On success the platform's order id is written into `order`. Vendors
    /// without label support fail with
    /// [`CloudError::Unsupported`](crate::CloudError::Unsupported).
    async fn print_label_order(&self, device: &Device, order: &mut Order) -> CloudResult<()>;

    /// Refresh the printed flag of `order` from the platform.
    async fn query_order(&self, order: &mut Order) -> CloudResult<()>;

    /// Count printed and waiting orders for `device` on one day.
    async fn query_device_orders(
        &self,
        device: &Device,
        option: &QueryOption,
    ) -> CloudResult<DeviceOrderStat>;

    /// Drop every queued order of `device`.
    async fn clear_device_orders(&self, device: &Device) -> CloudResult<()>;
}
