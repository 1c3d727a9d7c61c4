//! # cloudprint
//!
//! One client surface over three Chinese cloud printer platforms: Feie,
//! Spyun and Xpyun.
//!
//! Pick the adapter your hardware talks to and keep application code on
//! [`CloudApi`] and the shared domain types; the per-platform wire
//! formats, signatures and reply envelopes stay behind the trait.
//!
//! ## Example
//!
//! ```ignore
//! use cloudprint::{CloudApi, CloudAuth, Device, FeieCloud, Order};
//!
//! let cloud = FeieCloud::new(CloudAuth::new("app_id", "secret"));
//!
//! let mut device = Device::new("01234").with_key("abcde");
//! cloud.add_device(&device).await?;
//!
//! let mut order = Order::new("<CB>table 12</CB><BR>2x noodles").with_copies(2);
//! cloud.print_msg_order(&device, &mut order).await?;
//! println!("queued as {:?}", order.id);
//! ```

pub mod cloud;
pub mod error;
pub mod models;

mod feie;
mod spyun;
mod xpyun;

pub use cloud::CloudApi;
pub use error::{CloudError, CloudResult};
pub use feie::FeieCloud;
pub use models::{CutMode, Device, DeviceOrderStat, DeviceStatus, Order, QueryOption, Voice};
pub use spyun::SpyunCloud;
pub use xpyun::XpyunCloud;

// Re-export the raw layer pieces adapters are configured with.
pub use cloudprint_api::{
    ApiError, ApiHeaders, ApiResult, CloudAuth, CloudClock, HttpEngine, Params, ReqwestEngine,
    SystemClock,
};
