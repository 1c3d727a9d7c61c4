//! Time source for request stamping

use chrono::Utc;

/// Supplies the epoch second written into vendor requests.
///
/// The timestamp flows into the request signature, so pinning the clock
/// pins the signature. Production code uses [`SystemClock`]; tests inject
/// a fixed value.
pub trait CloudClock: Send + Sync {
    /// Current time as whole seconds since the Unix epoch.
    fn epoch_second(&self) -> i64;
}

/// Wall-clock [`CloudClock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl CloudClock for SystemClock {
    fn epoch_second(&self) -> i64 {
        Utc::now().timestamp()
    }
}
