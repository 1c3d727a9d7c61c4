//! Feie (飞鹅云) adapter
//!
//! Feie takes every operation as a form POST against one endpoint, with the
//! `apiname` field selecting the action. Replies share a `{ret, msg, data}`
//! envelope where `ret` zero means success.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use cloudprint_api::{CloudAuth, CloudClock, FeieApi, HttpEngine, Params, ReqwestEngine};

use crate::cloud::CloudApi;
use crate::error::{CloudError, CloudResult, parse_body};
use crate::models::{Device, DeviceOrderStat, DeviceStatus, Order, QueryOption};

fn default_ret() -> i32 {
    -1
}

/// Feie reply envelope. A body without `ret` counts as failed.
#[derive(Debug, Deserialize)]
struct FeieReply<T> {
    #[serde(default = "default_ret")]
    ret: i32,
    msg: Option<String>,
    data: Option<T>,
}

impl<T> FeieReply<T> {
    fn is_ok(&self) -> bool {
        self.ret == 0
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

/// Bulk device calls report per-sn outcomes in two lists.
#[derive(Debug, Deserialize)]
struct FeieDeviceLists {
    #[serde(default)]
    ok: Vec<String>,
    #[serde(default)]
    no: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FeieOrderCounts {
    #[serde(default)]
    print: u32,
    #[serde(default)]
    waiting: u32,
}

/// Success means the platform acknowledged; the payload is ignored.
fn acknowledge(body: &str) -> CloudResult<()> {
    let reply: FeieReply<serde_json::Value> = parse_body(body)?;
    if reply.is_ok() { Ok(()) } else { Err(reply.fail()) }
}

/// Any accepted sn counts as success, otherwise the first refusal is the
/// error.
fn collapse_lists(body: &str) -> CloudResult<()> {
    let reply: FeieReply<FeieDeviceLists> = parse_body(body)?;
    let lists = reply.into_data()?;
    if lists.ok.is_empty() {
        Err(CloudError::Vendor(
            lists.no.first().cloned().unwrap_or_default(),
        ))
    } else {
        Ok(())
    }
}

/// `sn#key#name#cardno`, absent fields left empty.
fn printer_content(device: &Device) -> String {
    format!(
        "{}#{}#{}#{}",
        device.sn(),
        device.key.as_deref().unwrap_or_default(),
        device.name.as_deref().unwrap_or_default(),
        device.cardno.as_deref().unwrap_or_default()
    )
}

/// [`CloudApi`] implementation for Feie.
pub struct FeieCloud {
    api: FeieApi,
    backurl: Option<String>,
}

impl FeieCloud {
    /// Adapter talking to the live platform.
    pub fn new(auth: CloudAuth) -> Self {
        Self::with_engine(auth, Arc::new(ReqwestEngine::new()))
    }

    /// Adapter over a caller-supplied transport.
    pub fn with_engine(auth: CloudAuth, engine: Arc<dyn HttpEngine>) -> Self {
        Self {
            api: FeieApi::new(auth, engine),
            backurl: None,
        }
    }

    /// Replace the request-stamping clock.
    pub fn with_clock(mut self, clock: Arc<dyn CloudClock>) -> Self {
        self.api = self.api.with_clock(clock);
        self
    }

    /// Callback URL the platform notifies once an order printed.
    pub fn with_backurl(mut self, backurl: impl Into<String>) -> Self {
        self.backurl = Some(backurl.into());
        self
    }

    async fn print(&self, device: &Device, order: &mut Order, label: bool) -> CloudResult<()> {
        let mut params = Params::new()
            .with("sn", device.sn())
            .with("times", order.copies());
        params.set_opt("content", Some(order.content.as_str()));
        if order.expired_epoch_second > 0 {
            params.set("expired", order.expired_epoch_second);
        }
        params.set_opt("backurl", self.backurl.as_deref());
        let body = if label {
            self.api.print_label_order(params).await?
        } else {
            self.api.print_msg_order(params).await?
        };
        let reply: FeieReply<String> = parse_body(&body)?;
        order.id = Some(reply.into_data()?);
        Ok(())
    }
}

#[async_trait]
impl CloudApi for FeieCloud {
    async fn add_device(&self, device: &Device) -> CloudResult<()> {
        let params = Params::new().with("printerContent", printer_content(device));
        let body = self.api.add_printer(params).await?;
        collapse_lists(&body)
    }

    async fn delete_device(&self, device: &Device) -> CloudResult<()> {
        let params = Params::new().with("snlist", device.sn());
        let body = self.api.delete_printer(params).await?;
        collapse_lists(&body)
    }

    async fn query_device(&self, device: &mut Device) -> CloudResult<()> {
        let params = Params::new().with("sn", device.sn());
        let body = self.api.query_printer(params).await?;
        let reply: FeieReply<String> = parse_body(&body)?;
        let state = reply.into_data()?;
        if state.starts_with("在线，工作状态正常") {
            device.mark_online();
            device.set_status(DeviceStatus::Normal);
        } else if state.starts_with("在线，工作状态不正常") {
            device.mark_online();
            device.set_status(DeviceStatus::Anormal);
        } else {
            device.mark_offline();
            device.set_status(DeviceStatus::Anormal);
        }
        Ok(())
    }

    async fn update_device(&self, device: &Device) -> CloudResult<()> {
        let mut params = Params::new().with("sn", device.sn());
        params.set_opt("name", device.name.as_deref());
        params.set_opt("phonenum", device.cardno.as_deref());
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
        params.set_opt("orderid", order.id.as_deref());
        let body = self.api.query_order(params).await?;
        let reply: FeieReply<bool> = parse_body(&body)?;
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
        let reply: FeieReply<FeieOrderCounts> = parse_body(&body)?;
        let counts = reply.into_data()?;
        Ok(DeviceOrderStat::new(
            device.sn(),
            option.date.clone().unwrap_or_default(),
            counts.print,
            counts.waiting,
        ))
    }

    async fn clear_device_orders(&self, device: &Device) -> CloudResult<()> {
        let params = Params::new().with("sn", device.sn());
        let body = self.api.clear_printer_orders(params).await?;
        acknowledge(&body)
    }
}
