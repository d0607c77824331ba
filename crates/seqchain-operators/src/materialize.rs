//! Materializer: drains a node into concrete structures.
//!
//! Draining starts at the node's current position; nothing is restarted
//! first. The first failing pull aborts the drain and its error is returned.

use seqchain_core::error::Result;
use seqchain_core::keyed::KeyedArray;

use crate::metrics;
use crate::seq::Seq;

/// Drain into a keyed array. A key emitted twice keeps its first position
/// and its last value.
pub fn to_array<V: 'static>(seq: &mut Seq<V>) -> Result<KeyedArray<V>> {
    let trace = seq.config().trace_pulls;
    let mut out = KeyedArray::with_capacity(seq.config().materialize_capacity_hint);
    let mut pairs = 0usize;
    while let Some((k, v)) = seq.next_pair()? {
        if trace {
            metrics::pulled(&k);
        }
        out.insert(k, v);
        pairs += 1;
    }
    metrics::drained(seq.name(), pairs);
    Ok(out)
}

/// Drain the values in emission order. Keys are dropped, so colliding keys
/// do not collapse.
pub fn to_vec<V: 'static>(seq: &mut Seq<V>) -> Result<Vec<V>> {
    let mut out = Vec::with_capacity(seq.config().materialize_capacity_hint);
    while let Some((_, v)) = seq.next_pair()? {
        out.push(v);
    }
    metrics::drained(seq.name(), out.len());
    Ok(out)
}
