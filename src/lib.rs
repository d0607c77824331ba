#![forbid(unsafe_code)]
//! seqchain: lazy, chainable query operators over ordered key-value sequences.
//!
//! ```
//! use seqchain::Seq;
//!
//! let evens = Seq::range(1, 5)?
//!     .filter(|x| x % 2 == 0)
//!     .transform(|x| x * 10)
//!     .to_vec()?;
//! assert_eq!(evens, vec![20, 40]);
//! # Ok::<(), seqchain::Error>(())
//! ```
//!
//! Keys are never re-indexed: `filter` leaves gaps, and `to_array` keys each
//! value by the key it was emitted with.

pub use seqchain_core::config::SeqConfig;
pub use seqchain_core::error::{BoxError, Error, Result};
pub use seqchain_core::hash::{digest_value, Digest};
pub use seqchain_core::key::Key;
pub use seqchain_core::keyed::KeyedArray;

pub use seqchain_operators::{Capabilities, Cursor, IntoPairs, Pairs, Seq};

pub mod prelude {
    pub use seqchain_core::prelude::*;
    pub use seqchain_operators::{Capabilities, Cursor, Seq};
}
