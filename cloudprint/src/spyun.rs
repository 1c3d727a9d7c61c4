//! Spyun adapter
//!
//! Spyun is REST-shaped: the HTTP verb varies per operation and replies are
//! flat, with the `errorcode`/`errormsg` pair sitting beside the payload
//! fields instead of wrapping them.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use cloudprint_api::{CloudAuth, CloudClock, HttpEngine, Params, ReqwestEngine, SpyunApi};

use crate::cloud::CloudApi;
use crate::error::{CloudError, CloudResult, parse_body};
use crate::models::{CutMode, Device, DeviceOrderStat, DeviceStatus, Order, QueryOption};

fn default_errorcode() -> i32 {
    -1
}

/// Error pair present in every Spyun reply. A body without `errorcode`
/// counts as failed.
#[derive(Debug, Deserialize)]
struct SpyunReply {
    #[serde(default = "default_errorcode")]
    errorcode: i32,
    errormsg: Option<String>,
}

impl SpyunReply {
    fn is_ok(&self) -> bool {
        self.errorcode == 0
    }

    fn ensure_ok(&self) -> CloudResult<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(CloudError::Vendor(
                self.errormsg.clone().unwrap_or_default(),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
struct SpyunDevice {
    #[serde(flatten)]
    reply: SpyunReply,
    name: Option<String>,
    imsi: Option<String>,
    #[serde(default)]
    online: i32,
    #[serde(default)]
    status: i32,
    #[serde(default)]
    auto_cut: i32,
}

#[derive(Debug, Deserialize)]
struct SpyunPrinted {
    #[serde(flatten)]
    reply: SpyunReply,
    id: Option<String>,
    create_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpyunOrderState {
    #[serde(flatten)]
    reply: SpyunReply,
    #[serde(default)]
    status: bool,
    print_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpyunOrderCount {
    #[serde(flatten)]
    reply: SpyunReply,
    #[serde(default)]
    number: u32,
}

fn acknowledge(body: &str) -> CloudResult<()> {
    parse_body::<SpyunReply>(body)?.ensure_ok()
}

/// [`CloudApi`] implementation for Spyun.
pub struct SpyunCloud {
    api: SpyunApi,
}

impl SpyunCloud {
    /// Adapter talking to the live platform.
    pub fn new(auth: CloudAuth) -> Self {
        Self::with_engine(auth, Arc::new(ReqwestEngine::new()))
    }

    /// Adapter over a caller-supplied transport.
    pub fn with_engine(auth: CloudAuth, engine: Arc<dyn HttpEngine>) -> Self {
        Self {
            api: SpyunApi::new(auth, engine),
        }
    }

    /// Replace the request-stamping clock.
    pub fn with_clock(mut self, clock: Arc<dyn CloudClock>) -> Self {
        self.api = self.api.with_clock(clock);
        self
    }
}

#[async_trait]
impl CloudApi for SpyunCloud {
    async fn add_device(&self, device: &Device) -> CloudResult<()> {
        let mut params = Params::new().with("sn", device.sn());
        params.set_opt("pkey", device.key.as_deref());
        params.set_opt("name", device.name.as_deref());
        let body = self.api.add_printer(params).await?;
        acknowledge(&body)
    }

    async fn delete_device(&self, device: &Device) -> CloudResult<()> {
        let params = Params::new().with("sn", device.sn());
        let body = self.api.delete_printer(params).await?;
        acknowledge(&body)
    }

    async fn query_device(&self, device: &mut Device) -> CloudResult<()> {
        let params = Params::new().with("sn", device.sn());
        let body = self.api.query_printer(params).await?;
        let reply: SpyunDevice = parse_body(&body)?;
        reply.reply.ensure_ok()?;
        device.name = reply.name;
        device.cardno = reply.imsi;
        device.set_status(if reply.status == 0 {
            DeviceStatus::Normal
        } else {
            DeviceStatus::Anormal
        });
        if reply.online == 1 {
            device.mark_online();
        } else {
            device.mark_offline();
        }
        device.cut_mode = Some(if reply.auto_cut == 1 {
            CutMode::AutoCut
        } else {
            CutMode::ManualCut
        });
        Ok(())
    }

    async fn update_device(&self, device: &Device) -> CloudResult<()> {
        let mut params = Params::new().with("sn", device.sn());
        params.set_opt("name", device.name.as_deref());
        let body = self.api.update_printer(params).await?;
        acknowledge(&body)
    }

    async fn print_msg_order(&self, device: &Device, order: &mut Order) -> CloudResult<()> {
        let mut params = Params::new()
            .with("sn", device.sn())
            .with("times", order.copies());
        params.set_opt("content", Some(order.content.as_str()));
        let body = self.api.print_msg_order(params).await?;
        let reply: SpyunPrinted = parse_body(&body)?;
        reply.reply.ensure_ok()?;
        order.id = Some(reply.id.ok_or(CloudError::Parse)?);
        order.create_time = reply.create_time;
        Ok(())
    }

    /// Spyun has no label printing endpoint; fails without a network call.
    async fn print_label_order(&self, _device: &Device, _order: &mut Order) -> CloudResult<()> {
        Err(CloudError::Unsupported)
    }

    async fn query_order(&self, order: &mut Order) -> CloudResult<()> {
        let mut params = Params::new();
        params.set_opt("id", order.id.as_deref());
        let body = self.api.query_order(params).await?;
        let reply: SpyunOrderState = parse_body(&body)?;
        reply.reply.ensure_ok()?;
        if reply.status {
            order.mark_printed();
        } else {
            order.mark_waiting();
        }
        order.print_time = reply.print_time;
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
        let reply: SpyunOrderCount = parse_body(&body)?;
        reply.reply.ensure_ok()?;
        // Spyun reports no waiting counter; it stays zero.
        Ok(DeviceOrderStat::new(
            device.sn(),
            option.date.clone().unwrap_or_default(),
            reply.number,
            0,
        ))
    }

    async fn clear_device_orders(&self, device: &Device) -> CloudResult<()> {
        let params = Params::new().with("sn", device.sn());
        let body = self.api.clear_printer_orders(params).await?;
        acknowledge(&body)
    }
}
