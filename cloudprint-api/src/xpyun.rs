//! Raw client for the Xpyun open platform

use std::sync::Arc;

use crate::auth::CloudAuth;
use crate::clock::{CloudClock, SystemClock};
use crate::engine::{ApiHeaders, HttpEngine};
use crate::error::ApiResult;
use crate::params::Params;
use crate::sign::{ApiSignature, Sha1Signature};

pub const BASE_URL: &str = "https://open.xpyun.net/api/openapi/xprinter/";

/// Low-level Xpyun client working on raw parameter maps.
///
/// Every operation is a JSON POST to its own path; nested values (the
/// `items` array of a bulk add) ride along unchanged. Stamping and signing
/// follow the Feie scheme, keyed on `timestamp`/`sign`, and never
/// overwrite caller-provided values.
pub struct XpyunApi {
    auth: CloudAuth,
    clock: Arc<dyn CloudClock>,
    engine: Arc<dyn HttpEngine>,
    signature: Sha1Signature,
}

impl XpyunApi {
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
            "application/json;charset=UTF-8".to_string(),
        )])
    }

    /// Stamp, sign and POST `params` as the JSON body of `path`.
    pub async fn send(&self, path: &str, mut params: Params) -> ApiResult<String> {
        if !params.contains("timestamp") {
            params.set("timestamp", self.clock.epoch_second());
        }
        if !params.contains("sign") {
            let timestamp = params.text("timestamp").unwrap_or_default();
            params.set("user", self.auth.app_id());
            params.set(
                "sign",
                self.signature
                    .signature(&[self.auth.app_id(), self.auth.secret(), &timestamp]),
            );
        }
        let url = format!("{BASE_URL}{path}");
        self.engine
            .post(&url, &params, &Self::request_headers())
            .await
    }

    pub async fn add_printer(&self, params: Params) -> ApiResult<String> {
        self.send("addPrinters", params).await
    }

    pub async fn delete_printer(&self, params: Params) -> ApiResult<String> {
        self.send("delPrinters", params).await
    }

    pub async fn update_printer(&self, params: Params) -> ApiResult<String> {
        self.send("updPrinter", params).await
    }

    pub async fn update_printer_setting(&self, params: Params) -> ApiResult<String> {
        self.send("setVoiceType", params).await
    }

    pub async fn query_printer(&self, params: Params) -> ApiResult<String> {
        self.send("queryPrinterStatus", params).await
    }

    pub async fn print_msg_order(&self, params: Params) -> ApiResult<String> {
        self.send("print", params).await
    }

    pub async fn print_label_order(&self, params: Params) -> ApiResult<String> {
        self.send("printLabel", params).await
    }

    pub async fn query_order(&self, params: Params) -> ApiResult<String> {
        self.send("queryOrderState", params).await
    }

    pub async fn clear_printer_orders(&self, params: Params) -> ApiResult<String> {
        self.send("delPrinterQueue", params).await
    }

    pub async fn query_printer_order_stats(&self, params: Params) -> ApiResult<String> {
        self.send("queryOrderStatis", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{FixedClock, MockEngine};
    use serde_json::json;

    fn client(engine: Arc<MockEngine>) -> XpyunApi {
        XpyunApi::new(CloudAuth::new("test_id", "test_secret"), engine)
            .with_clock(Arc::new(FixedClock(1_000_000_000)))
    }

    #[tokio::test]
    async fn test_send_stamps_time_and_signature() {
        let engine = Arc::new(MockEngine::replying("{\"code\":0}"));
        let api = client(engine.clone());

        api.query_printer(Params::new().with("sn", "01234")).await.unwrap();

        let call = engine.last_call();
        assert_eq!(call.verb, "POST");
        assert_eq!(call.url, format!("{BASE_URL}queryPrinterStatus"));
        assert_eq!(call.params.text("timestamp").as_deref(), Some("1000000000"));
        assert_eq!(call.params.text("user").as_deref(), Some("test_id"));
        assert_eq!(
            call.params.text("sign").as_deref(),
            Some("c92c63ca5be6d9d31c71a8cc7e6140d59f79a9af")
        );
        assert_eq!(
            call.headers.get("Content-Type").map(String::as_str),
            Some("application/json;charset=UTF-8")
        );
    }

    #[tokio::test]
    async fn test_send_keeps_caller_stamp_and_signature() {
        let engine = Arc::new(MockEngine::replying("{\"code\":0}"));
        let api = client(engine.clone());

        let params = Params::new()
            .with("timestamp", "42")
            .with("sign", "precomputed");
        api.send("print", params).await.unwrap();

        let call = engine.last_call();
        assert_eq!(call.params.text("timestamp").as_deref(), Some("42"));
        assert_eq!(call.params.text("sign").as_deref(), Some("precomputed"));
        assert!(!call.params.contains("user"));
    }

    #[tokio::test]
    async fn test_voice_setting_uses_its_own_path() {
        let engine = Arc::new(MockEngine::replying("{\"code\":0}"));
        let api = client(engine.clone());

        api.update_printer_setting(Params::new().with("sn", "01234").with("voiceType", 2))
            .await
            .unwrap();

        assert_eq!(engine.last_call().url, format!("{BASE_URL}setVoiceType"));
    }

    #[tokio::test]
    async fn test_nested_values_survive() {
        let engine = Arc::new(MockEngine::replying("{\"code\":0}"));
        let api = client(engine.clone());

        let params = Params::new().with("items", json!([{"sn": "01234", "name": "front"}]));
        api.add_printer(params).await.unwrap();

        let call = engine.last_call();
        assert_eq!(call.url, format!("{BASE_URL}addPrinters"));
        assert_eq!(
            call.params.get("items"),
            Some(&json!([{"sn": "01234", "name": "front"}]))
        );
    }
}
