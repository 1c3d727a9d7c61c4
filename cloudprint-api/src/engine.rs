//! HTTP transport abstraction and its reqwest implementation

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::params::Params;

/// Request headers as plain string pairs.
pub type ApiHeaders = HashMap<String, String>;

/// The minimal HTTP surface the vendor clients need.
///
/// One call is one request: no retries, no caching, no vendor knowledge.
/// A 200 answer comes back as the raw body text; anything else is an
/// error. This is the seam tests plug a recording fake into.
#[async_trait]
pub trait HttpEngine: Send + Sync {
    /// GET with `params` encoded into the query string.
    async fn get(&self, url: &str, params: &Params, headers: &ApiHeaders) -> ApiResult<String>;

    /// POST with `params` as a JSON body when `headers` select JSON,
    /// form-urlencoded otherwise.
    async fn post(&self, url: &str, params: &Params, headers: &ApiHeaders) -> ApiResult<String>;

    /// DELETE with `params` encoded into the query string.
    async fn delete(&self, url: &str, params: &Params, headers: &ApiHeaders) -> ApiResult<String>;

    /// PATCH with `params` as a form-urlencoded body.
    async fn patch(&self, url: &str, params: &Params, headers: &ApiHeaders) -> ApiResult<String>;
}

/// Whether `headers` select a JSON request body.
///
/// Only the media type up to the first `;` counts, compared case
/// insensitively, so `application/json;charset=UTF-8` selects JSON.
pub fn use_json(headers: &ApiHeaders) -> bool {
    let Some(content_type) = headers.get("Content-Type") else {
        return false;
    };
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json")
}

/// [`HttpEngine`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// Engine with 5 second connect/request timeouts and a 15 second
    /// idle-connection cap.
    ///
    /// # Panics
    ///
    /// Panics when the TLS backend cannot be initialised; that is a broken
    /// build environment, not a runtime condition.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(5))
            .pool_idle_timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    /// Engine around a caller-configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn header_map(headers: &ApiHeaders) -> ApiResult<HeaderMap> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| ApiError::Request(err.to_string()))?;
            let value =
                HeaderValue::from_str(value).map_err(|err| ApiError::Request(err.to_string()))?;
            map.insert(name, value);
        }
        Ok(map)
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        headers: &ApiHeaders,
    ) -> ApiResult<String> {
        let request = request.headers(Self::header_map(headers)?);
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Request(err.to_string()))?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "vendor rejected the request");
            return Err(ApiError::Status(status.as_u16()));
        }
        response
            .text()
            .await
            .map_err(|err| ApiError::Request(err.to_string()))
    }
}

impl Default for ReqwestEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpEngine for ReqwestEngine {
    async fn get(&self, url: &str, params: &Params, headers: &ApiHeaders) -> ApiResult<String> {
        debug!(url, "GET");
        let request = self.client.get(url).query(&params.form_pairs());
        self.execute(request, headers).await
    }

    async fn post(&self, url: &str, params: &Params, headers: &ApiHeaders) -> ApiResult<String> {
        debug!(url, "POST");
        let request = if use_json(headers) {
            let body =
                serde_json::to_string(params).map_err(|err| ApiError::Request(err.to_string()))?;
            self.client.post(url).body(body)
        } else {
            self.client.post(url).form(&params.form_pairs())
        };
        self.execute(request, headers).await
    }

    async fn delete(&self, url: &str, params: &Params, headers: &ApiHeaders) -> ApiResult<String> {
        debug!(url, "DELETE");
        let request = self.client.delete(url).query(&params.form_pairs());
        self.execute(request, headers).await
    }

    async fn patch(&self, url: &str, params: &Params, headers: &ApiHeaders) -> ApiResult<String> {
        debug!(url, "PATCH");
        let request = self.client.patch(url).form(&params.form_pairs());
        self.execute(request, headers).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(content_type: &str) -> ApiHeaders {
        ApiHeaders::from([("Content-Type".to_string(), content_type.to_string())])
    }

    #[test]
    fn test_use_json_matches_media_type_only() {
        assert!(use_json(&headers_with("application/json")));
        assert!(use_json(&headers_with("application/json;charset=UTF-8")));
        assert!(use_json(&headers_with("Application/JSON; charset=utf-8")));
    }

    #[test]
    fn test_use_json_rejects_form_and_missing() {
        assert!(!use_json(&headers_with(
            "application/x-www-form-urlencoded; charset=UTF-8"
        )));
        assert!(!use_json(&ApiHeaders::new()));
    }
}
