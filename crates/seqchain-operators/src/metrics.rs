//! Tracing hooks.
//!
//! Compiled to no-ops unless the `tracing` feature is enabled.

use seqchain_core::hash::Digest;
use seqchain_core::key::Key;

use crate::traits::Capabilities;

#[cfg(feature = "tracing")]
pub fn node_built(op: &'static str, caps: Capabilities) {
    tracing::debug!(
        op,
        restartable = caps.restartable,
        countable = caps.countable,
        "node built"
    );
}

#[cfg(not(feature = "tracing"))]
pub fn node_built(_op: &'static str, _caps: Capabilities) { /* no-op */
}

#[cfg(feature = "tracing")]
pub fn window(total: usize, skip: usize, emit: usize) {
    tracing::trace!(total, skip, emit, "take_last window");
}

#[cfg(not(feature = "tracing"))]
pub fn window(_total: usize, _skip: usize, _emit: usize) { /* no-op */
}

#[cfg(feature = "tracing")]
pub fn duplicate(digest: &Digest) {
    tracing::trace!(digest = %digest, "distinct skipped duplicate");
}

#[cfg(not(feature = "tracing"))]
pub fn duplicate(_digest: &Digest) { /* no-op */
}

#[cfg(feature = "tracing")]
pub fn pulled(key: &Key) {
    tracing::trace!(key = %key, "pulled");
}

#[cfg(not(feature = "tracing"))]
pub fn pulled(_key: &Key) { /* no-op */
}

#[cfg(feature = "tracing")]
pub fn drained(op: &'static str, pairs: usize) {
    tracing::debug!(op, pairs, "materialized");
}

#[cfg(not(feature = "tracing"))]
pub fn drained(_op: &'static str, _pairs: usize) { /* no-op */
}
