//! # cloudprint-api
//!
//! Raw HTTP bindings for three Chinese cloud printer platforms.
//!
//! Feie, Spyun and Xpyun all follow the same shape: stamp the request with
//! the current epoch second, sign it with an account secret, send it to a
//! fixed HTTPS endpoint and read back a JSON body. This crate keeps that
//! shape behind one small client per vendor, working on raw parameter maps
//! and returning raw body text.
//!
//! The typed layer (domain model, response mapping) lives in the
//! `cloudprint` crate; reach for this one when you need an operation or a
//! field the typed layer does not expose.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cloudprint_api::{CloudAuth, FeieApi, Params, ReqwestEngine};
//!
//! let auth = CloudAuth::new("app_id", "secret");
//! let api = FeieApi::new(auth, Arc::new(ReqwestEngine::new()));
//! let body = api.query_printer(Params::new().with("sn", "01234")).await?;
//! ```

pub mod auth;
pub mod clock;
pub mod engine;
pub mod error;
pub mod feie;
pub mod params;
pub mod sign;
pub mod spyun;
pub mod xpyun;

pub use auth::CloudAuth;
pub use clock::{CloudClock, SystemClock};
pub use engine::{ApiHeaders, HttpEngine, ReqwestEngine};
pub use error::{ApiError, ApiResult};
pub use feie::FeieApi;
pub use params::Params;
pub use sign::{ApiSignature, Md5Signature, Sha1Signature};
pub use spyun::SpyunApi;
pub use xpyun::XpyunApi;
