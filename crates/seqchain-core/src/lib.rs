#![forbid(unsafe_code)]
//! seqchain-core: keys, keyed arrays, content digests, errors, and config.
//!
//! Operator logic lives in `seqchain-operators`; this crate only holds the
//! value-level pieces every node agrees on.

pub mod config;
pub mod error;
pub mod hash;
pub mod key;
pub mod keyed;
pub mod prelude;

pub use config::SeqConfig;
pub use error::{BoxError, Error, Result};
pub use hash::{digest_value, Digest};
pub use key::Key;
pub use keyed::KeyedArray;
