//! Xpyun (芯烨云) adapter
//!
//! Xpyun POSTs a JSON body to one path per operation and wraps replies in
//! a `{code, msg, data}` envelope where `code` zero means success. Request
//! payloads may nest arrays, as the bulk add does.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use cloudprint_api::{
    CloudAuth, CloudClock, HttpEngine, Params, ReqwestEngine, SystemClock, XpyunApi,
};

use crate::cloud::CloudApi;
use crate::error::{CloudError, CloudResult, parse_body};
use crate::models::{Device, DeviceOrderStat, DeviceStatus, Order, QueryOption};

fn default_code() -> i32 {
    -1
}

/// Xpyun reply envelope. A body without `code` counts as failed.
#[derive(Debug, Deserialize)]
struct XpyunReply<T> {
    #[serde(default = "default_code")]
    code: i32,
    msg: Option<String>,
    data: Option<T>,
}

impl<T> XpyunReply<T> {
    fn is_ok(&self) -> bool {
        self.code == 0
    }

    /// The platform's own message, verbatim, as the failure.
    fn fail(self) -> CloudError {
        CloudError::Vendor(self.msg.unwrap_or_default())
    }

    fn into_data(self) -> CloudResult<T> {
        if !self.is_ok() {
            return Err(self.fail());
        }
        self.data.ok_or(CloudError::Parse)
    }
}

/// Bulk device calls report per-sn outcomes in success/failure lists.
#[derive(Debug, Deserialize)]
struct XpyunDeviceLists {
    #[serde(default)]
    success: Vec<String>,
    #[serde(default, rename = "failMsg")]
    fail_msg: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct XpyunOrderCounts {
    #[serde(default)]
    printed: u32,
    #[serde(default)]
    waiting: u32,
}

/// Success means the platform acknowledged; the payload is ignored.
fn acknowledge(body: &str) -> CloudResult<()> {
    let reply: XpyunReply<Value> = parse_body(body)?;
    if reply.is_ok() { Ok(()) } else { Err(reply.fail()) }
}

/// Any accepted sn counts as success, otherwise the first refusal is the
/// error.
fn collapse_lists(body: &str) -> CloudResult<()> {
    let reply: XpyunReply<XpyunDeviceLists> = parse_body(body)?;
    let lists = reply.into_data()?;
    if lists.success.is_empty() {
        Err(CloudError::Vendor(
            lists.fail_msg.first().cloned().unwrap_or_default(),
        ))
    } else {
        Ok(())
    }
}

/// Bulk-add item for one device, name omitted when blank.
fn device_item(device: &Device) -> Value {
    let mut item = serde_json::Map::new();
    item.insert("sn".to_string(), device.sn().into());
    if let Some(name) = device.name.as_deref()
        && !name.trim().is_empty()
    {
        item.insert("name".to_string(), name.into());
    }
    Value::Object(item)
}

/// [`CloudApi`] implementation for Xpyun.
pub struct XpyunCloud {
    api: XpyunApi,
    clock: Arc<dyn CloudClock>,
    backurl_flag: Option<i32>,
}

impl XpyunCloud {
    /// Adapter talking to the live platform.
    pub fn new(auth: CloudAuth) -> Self {
        Self::with_engine(auth, Arc::new(ReqwestEngine::new()))
    }

    /// Adapter over a caller-supplied transport.
    pub fn with_engine(auth: CloudAuth, engine: Arc<dyn HttpEngine>) -> Self {
        Self {
            api: XpyunApi::new(auth, engine),
            clock: Arc::new(SystemClock),
            backurl_flag: None,
        }
    }

    /// Replace the clock used for both request stamping and expiry
    /// countdowns.
    pub fn with_clock(mut self, clock: Arc<dyn CloudClock>) -> Self {
        self.api = self.api.with_clock(clock.clone());
        self.clock = clock;
        self
    }

    /// Callback flag passed with every print call (1 asks the platform to
    /// report print status to the configured callback).
    pub fn with_backurl_flag(mut self, flag: i32) -> Self {
        self.backurl_flag = Some(flag);
        self
    }

    async fn print(&self, device: &Device, order: &mut Order, label: bool) -> CloudResult<()> {
        let mut params = Params::new()
            .with("sn", device.sn())
            .with("copies", order.copies());
        params.set_opt("content", Some(order.content.as_str()));
        // Xpyun wants a countdown, not an absolute expiry stamp.
        let expires_in = order.expired_epoch_second - self.clock.epoch_second();
        if expires_in > 0 {
            params.set("expiresIn", expires_in);
            params.set("mode", 1);
        }
        if let Some(flag) = self.backurl_flag {
            params.set("backurlFlag", flag);
        }
        let body = if label {
            self.api.print_label_order(params).await?
        } else {
            self.api.print_msg_order(params).await?
        };
        let reply: XpyunReply<String> = parse_body(&body)?;
        order.id = Some(reply.into_data()?);
        Ok(())
    }
}

#[async_trait]
impl CloudApi for XpyunCloud {
    async fn add_device(&self, device: &Device) -> CloudResult<()> {
        let params = Params::new().with("items", Value::Array(vec![device_item(device)]));
        let body = self.api.add_printer(params).await?;
        collapse_lists(&body)
    }

    async fn delete_device(&self, device: &Device) -> CloudResult<()> {
        let params = Params::new().with("snlist", json!([device.sn()]));
        let body = self.api.delete_printer(params).await?;
        collapse_lists(&body)
    }

    async fn query_device(&self, device: &mut Device) -> CloudResult<()> {
        let params = Params::new().with("sn", device.sn());
        let body = self.api.query_printer(params).await?;
        let reply: XpyunReply<i32> = parse_body(&body)?;
        match reply.into_data()? {
            1 => {
                device.mark_online();
                device.set_status(DeviceStatus::Normal);
            }
            2 => {
                device.mark_online();
                device.set_status(DeviceStatus::Anormal);
            }
            _ => {
                device.mark_offline();
                device.set_status(DeviceStatus::Anormal);
            }
        }
        Ok(())
    }

    async fn update_device(&self, device: &Device) -> CloudResult<()> {
        let mut params = Params::new().with("sn", device.sn());
        params.set_opt("name", device.name.as_deref());
        params.set_opt("cardno", device.cardno.as_deref());
        let body = self.api.update_printer(params).await?;
        acknowledge(&body)
    }

    async fn print_msg_order(&self, device: &Device, order: &mut Order) -> CloudResult<()> {
        self.print(device, order, false).await
    }

    async fn print_label_order(&self, device: &Device, order: &mut Order) -> CloudResult<()> {
        self.print(device, order, true).await
    }

    async fn query_order(&self, order: &mut Order) -> CloudResult<()> {
        let mut params = Params::new();
        params.set_opt("orderId", order.id.as_deref());
        let body = self.api.query_order(params).await?;
        let reply: XpyunReply<bool> = parse_body(&body)?;
        if reply.into_data()? {
            order.mark_printed();
        } else {
            order.mark_waiting();
        }
        Ok(())
    }

    async fn query_device_orders(
        &self,
        device: &Device,
        option: &QueryOption,
    ) -> CloudResult<DeviceOrderStat> {
        let mut params = Params::new().with("sn", device.sn());
        params.set_opt("date", option.date.as_deref());
        let body = self.api.query_printer_order_stats(params).await?;
        let reply: XpyunReply<XpyunOrderCounts> = parse_body(&body)?;
        let counts = reply.into_data()?;
        Ok(DeviceOrderStat::new(
            device.sn(),
            option.date.clone().unwrap_or_default(),
            counts.printed,
            counts.waiting,
        ))
    }

    async fn clear_device_orders(&self, device: &Device) -> CloudResult<()> {
        let params = Params::new().with("sn", device.sn());
        let body = self.api.clear_printer_orders(params).await?;
        acknowledge(&body)
    }
}
