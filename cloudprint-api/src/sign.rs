//! Request signature primitives shared by the vendor clients

use md5::Md5;
use sha1::{Digest, Sha1};

/// Hashes the concatenation of `parts` into a hex digest.
///
/// Every platform signs some concatenation of account fields and the
/// request timestamp; only the hash function and the hex case differ.
pub trait ApiSignature: Send + Sync {
    fn signature(&self, parts: &[&str]) -> String;
}

/// SHA-1 over the joined parts, lowercase hex. Feie and Xpyun.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha1Signature;

impl ApiSignature for Sha1Signature {
    fn signature(&self, parts: &[&str]) -> String {
        let mut hasher = Sha1::new();
        for part in parts {
            hasher.update(part.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// MD5 over the joined parts, uppercase hex. Spyun.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Signature;

impl ApiSignature for Md5Signature {
    fn signature(&self, parts: &[&str]) -> String {
        let mut hasher = Md5::new();
        for part in parts {
            hasher.update(part.as_bytes());
        }
        hex::encode_upper(hasher.finalize())
    }
}
