//! Printer Device Model

use serde::{Deserialize, Serialize};

/// Working status a platform reports for a printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    #[default]
    Normal,
    Anormal,
}

/// How the printer cuts paper after a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutMode {
    AutoCut,
    ManualCut,
}

/// Buzzer/announcement mode of the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Voice {
    #[default]
    Unknown,
    Off,
    Didi,
    Human,
}

/// One cloud-managed receipt printer.
///
/// The serial number is fixed at construction and identifies the device in
/// every platform call. `query_device` refreshes the mutable fields in
/// place; the caller owns the value throughout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    sn: String,
    online: bool,
    status: DeviceStatus,
    /// Pairing key some platforms require alongside the serial.
    pub key: Option<String>,
    pub name: Option<String>,
    /// SIM/phone number of the device, where the platform tracks one.
    pub cardno: Option<String>,
    pub cut_mode: Option<CutMode>,
    pub voice: Voice,
    pub volume: i32,
}

impl Device {
    pub fn new(sn: impl Into<String>) -> Self {
        Self {
            sn: sn.into(),
            online: false,
            status: DeviceStatus::Normal,
            key: None,
            name: None,
            cardno: None,
            cut_mode: None,
            voice: Voice::Unknown,
            volume: 0,
        }
    }

    /// The serial number this device was constructed with.
    pub fn sn(&self) -> &str {
        &self.sn
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_cardno(mut self, cardno: impl Into<String>) -> Self {
        self.cardno = Some(cardno.into());
        self
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn mark_online(&mut self) {
        self.online = true;
    }

    pub fn mark_offline(&mut self) {
        self.online = false;
    }

    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    pub fn set_status(&mut self, status: DeviceStatus) {
        self.status = status;
    }
}
