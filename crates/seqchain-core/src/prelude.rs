//! Convenient re-exports for downstream crates.

pub use crate::config::SeqConfig;
pub use crate::error::{BoxError, Error, Result};
pub use crate::hash::{digest_value, Digest};
pub use crate::key::Key;
pub use crate::keyed::KeyedArray;
