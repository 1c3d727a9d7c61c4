//! Vendor account credentials

use serde::{Deserialize, Serialize};

/// Credentials of one vendor developer account.
///
/// `app_id` is the account identifier the platform hands out (`USER` on
/// Feie, `appid` on Spyun, `user` on Xpyun) and `secret` the matching
/// signing key. The pair only ever feeds request signing; it is never sent
/// on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudAuth {
    app_id: String,
    secret: String,
}

impl CloudAuth {
    pub fn new(app_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            secret: secret.into(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}
