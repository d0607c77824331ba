//! Content digests used for value-based distinctness.
//!
//! A value is canonicalized through `serde_json::Value` (object keys end up
//! sorted) and the compact JSON bytes are hashed with blake3. Two values are
//! "the same" exactly when their digests are equal; there is no follow-up
//! full equality check, so values with identical canonical JSON collapse.

use blake3::Hasher;
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    pub fn to_hex(&self) -> String {
        // blake3 hex(32b) is 64 hex chars
        let mut s = String::with_capacity(64);
        for b in &self.0 {
            use std::fmt::Write as _;
            let _ = write!(&mut s, "{:02x}", b);
        }
        s
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

pub fn digest_bytes(bytes: &[u8]) -> Digest {
    let mut h = Hasher::new();
    h.update(bytes);
    let out = h.finalize();
    Digest(out.into())
}

/// Canonical bytes for `v`: JSON with object keys in sorted order.
pub fn canonical_bytes<T: Serialize + ?Sized>(v: &T) -> Result<Vec<u8>> {
    let value = serde_json::to_value(v)?;
    Ok(serde_json::to_vec(&value)?)
}

/// Digest any serde-serializable value by content.
pub fn digest_value<T: Serialize + ?Sized>(v: &T) -> Result<Digest> {
    Ok(digest_bytes(&canonical_bytes(v)?))
}
