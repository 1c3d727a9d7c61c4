//! Raw client for the Spyun open platform

use std::sync::Arc;

use crate::auth::CloudAuth;
use crate::clock::{CloudClock, SystemClock};
use crate::engine::{ApiHeaders, HttpEngine};
use crate::error::{ApiError, ApiResult};
use crate::params::Params;
use crate::sign::{ApiSignature, Md5Signature};

pub const BASE_URL: &str = "https://open.spyun.net/v1/printer/";

/// Verb is fixed by the operation; callers never pick one.
enum Verb {
    Get,
    Post,
    Delete,
    Patch,
}

/// Low-level Spyun client working on raw parameter maps.
///
/// Spyun is the one REST-shaped platform: each operation has its own path
/// and verb, and the signature covers the sorted parameter list. Blank
/// parameters are dropped before signing, so the signature matches what
/// actually goes on the wire. Caller-provided `timestamp`/`sign` values
/// are kept as-is.
pub struct SpyunApi {
    auth: CloudAuth,
    clock: Arc<dyn CloudClock>,
    engine: Arc<dyn HttpEngine>,
    signature: Md5Signature,
}

impl SpyunApi {
    pub fn new(auth: CloudAuth, engine: Arc<dyn HttpEngine>) -> Self {
        Self {
            auth,
            clock: Arc::new(SystemClock),
            engine,
            signature: Md5Signature,
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

    /// Stamp `timestamp`, drop blanks, then sign over the sorted entries.
    fn fill(&self, mut params: Params) -> Params {
        if !params.contains("timestamp") {
            params.set("timestamp", self.clock.epoch_second());
        }
        params.strip_blanks();
        if !params.contains("sign") {
            params.set("appid", self.auth.app_id());
            let canonical = params.canonical_query();
            params.set(
                "sign",
                self.signature
                    .signature(&[&canonical, "&appsecret=", self.auth.secret()]),
            );
        }
        params
    }

    async fn send(&self, verb: Verb, path: &str, params: Params) -> ApiResult<String> {
        let params = self.fill(params);
        let url = format!("{BASE_URL}{path}");
        let headers = Self::request_headers();
        match verb {
            Verb::Get => self.engine.get(&url, &params, &headers).await,
            Verb::Post => self.engine.post(&url, &params, &headers).await,
            Verb::Delete => self.engine.delete(&url, &params, &headers).await,
            Verb::Patch => self.engine.patch(&url, &params, &headers).await,
        }
    }

    pub async fn add_printer(&self, params: Params) -> ApiResult<String> {
        self.send(Verb::Post, "add", params).await
    }

    pub async fn delete_printer(&self, params: Params) -> ApiResult<String> {
        self.send(Verb::Delete, "delete", params).await
    }

    pub async fn update_printer(&self, params: Params) -> ApiResult<String> {
        self.send(Verb::Patch, "update", params).await
    }

    pub async fn update_printer_setting(&self, params: Params) -> ApiResult<String> {
        self.send(Verb::Patch, "setting", params).await
    }

    pub async fn query_printer(&self, params: Params) -> ApiResult<String> {
        self.send(Verb::Get, "info", params).await
    }

    pub async fn print_msg_order(&self, params: Params) -> ApiResult<String> {
        self.send(Verb::Post, "print", params).await
    }

    /// Spyun has no label printing; fails without touching the network.
    pub async fn print_label_order(&self, _params: Params) -> ApiResult<String> {
        Err(ApiError::Unsupported)
    }

    pub async fn query_order(&self, params: Params) -> ApiResult<String> {
        self.send(Verb::Get, "order/status", params).await
    }

    pub async fn clear_printer_orders(&self, params: Params) -> ApiResult<String> {
        self.send(Verb::Delete, "cleansqs", params).await
    }

    pub async fn query_printer_order_stats(&self, params: Params) -> ApiResult<String> {
        self.send(Verb::Get, "order/number", params).await
    }
}
