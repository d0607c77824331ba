#![forbid(unsafe_code)]
//! seqchain-operators: lazy, chainable operators over ordered key-value
//! sequences (transform/filter/distinct/take_first/take_last).
//!
//! Design intent:
//! - Pure, synchronous, single-threaded pull evaluation. Nothing runs until
//!   a consumer pulls, and a consumer that stops pulling simply stops work.
//! - Every node implements the same [`Cursor`] contract and is wrapped in a
//!   [`Seq`] handle, so any operator can be chained onto any other.
//! - Restart and count are capabilities, not assumptions. Operators that
//!   need them check and fail fast with `Error::Unsupported`.

pub mod distinct;
pub mod filter;
pub mod map;
pub mod materialize;
pub mod metrics;
pub mod seq;
pub mod source;
pub mod take;
pub mod traits;

pub use seq::{IntoPairs, Pairs, Seq};
pub use source::{ArraySource, GeneratorSource};
pub use traits::{Capabilities, Cursor};
