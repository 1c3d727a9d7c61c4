//! Raw client for the Feie open platform

use std::sync::Arc;

use crate::auth::CloudAuth;
use crate::clock::{CloudClock, SystemClock};
use crate::engine::{ApiHeaders, HttpEngine};
use crate::error::{ApiError, ApiResult};
use crate::params::Params;
use crate::sign::{ApiSignature, Sha1Signature};

/// Single endpoint for every Feie operation; the `apiname` field selects
/// the action.
pub const BASE_URL: &str = "https://api.feieyun.cn/Api/Open/";

/// Low-level Feie client working on raw parameter maps.
///
/// [`send`](Self::send) stamps `stime` and signs with `user`/`sig` unless
/// the caller already provided them, so a pre-signed map goes through
/// untouched.
pub struct FeieApi {
    auth: CloudAuth,
    clock: Arc<dyn CloudClock>,
    engine: Arc<dyn HttpEngine>,
    signature: Sha1Signature,
}

impl FeieApi {
    pub fn new(auth: CloudAuth, engine: Arc<dyn HttpEngine>) -> Self {
        Self {
            auth,
            clock: Arc::new(SystemClock),
            engine,
            signature: Sha1Signature,
        }
    }

    /// Replace the stamping clock.
    pub fn with_clock(mut self, clock: Arc<dyn CloudClock>) -> Self {
        self.clock = clock;
        self
    }

    fn request_headers() -> ApiHeaders {
        ApiHeaders::from([(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded; charset=UTF-8".to_string(),
        )])
    }

    /// Stamp, sign and POST `params` to the platform.
    pub async fn send(&self, mut params: Params) -> ApiResult<String> {
        if !params.contains("stime") {
            params.set("stime", self.clock.epoch_second());
        }
        if !params.contains("sig") {
            let stime = params.text("stime").unwrap_or_default();
            params.set("user", self.auth.app_id());
            params.set(
                "sig",
                self.signature
                    .signature(&[self.auth.app_id(), self.auth.secret(), &stime]),
            );
        }
        self.engine
            .post(BASE_URL, &params, &Self::request_headers())
            .await
    }

    pub async fn add_printer(&self, params: Params) -> ApiResult<String> {
        self.send(params.with("apiname", "Open_printerAddlist")).await
    }

    pub async fn delete_printer(&self, params: Params) -> ApiResult<String> {
        self.send(params.with("apiname", "Open_printerDelList")).await
    }

    pub async fn update_printer(&self, params: Params) -> ApiResult<String> {
        self.send(params.with("apiname", "Open_printerEdit")).await
    }

    /// Feie exposes no settings endpoint; fails without touching the
    /// network.
    pub async fn update_printer_setting(&self, _params: Params) -> ApiResult<String> {
        Err(ApiError::Unsupported)
    }

    pub async fn query_printer(&self, params: Params) -> ApiResult<String> {
        self.send(params.with("apiname", "Open_queryPrinterStatus"))
            .await
    }

    pub async fn print_msg_order(&self, params: Params) -> ApiResult<String> {
        self.send(params.with("apiname", "Open_printMsg")).await
    }

    pub async fn print_label_order(&self, params: Params) -> ApiResult<String> {
        self.send(params.with("apiname", "Open_printLabelMsg")).await
    }

    pub async fn query_order(&self, params: Params) -> ApiResult<String> {
        self.send(params.with("apiname", "Open_queryOrderState")).await
    }

    pub async fn clear_printer_orders(&self, params: Params) -> ApiResult<String> {
        self.send(params.with("apiname", "Open_delPrinterSqs")).await
    }

    pub async fn query_printer_order_stats(&self, params: Params) -> ApiResult<String> {
        self.send(params.with("apiname", "Open_queryOrderInfoByDate"))
            .await
    }
}
