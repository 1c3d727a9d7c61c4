//! Vendor-neutral domain entities
//!
//! These are the only shapes callers exchange with an adapter. Vendor
//! reply payloads never leak past the adapter boundary.

pub mod device;
pub mod order;
pub mod query;
pub mod stat;

// Re-exports
pub use device::*;
pub use order::*;
pub use query::*;
pub use stat::*;
