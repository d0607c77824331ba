//! Chain configuration that every node of a chain inherits.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeqConfig {
    /// Initial capacity of a distinct node's seen-set.
    pub distinct_capacity_hint: usize,

    /// Initial capacity of the keyed array built by `to_array`.
    pub materialize_capacity_hint: usize,

    /// Emit one trace event per pair drained by the materializer
    /// (only with the `tracing` feature).
    pub trace_pulls: bool,
}

impl Default for SeqConfig {
    fn default() -> Self {
        Self {
            distinct_capacity_hint: 16,
            materialize_capacity_hint: 0,
            trace_pulls: false,
        }
    }
}
