//! Enumeration contract shared by every node of a chain.
//!
//! A node is pulled one `(key, value)` pair at a time. Sources and operators
//! advertise what else they can do through [`Capabilities`]; callers that
//! need restart or count check them and get `Error::Unsupported` otherwise.

use seqchain_core::error::{Error, Result};
use seqchain_core::key::Key;

/// What a node supports beyond forward pulling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Can be re-traversed from the beginning (and forked).
    pub restartable: bool,
    /// Can report its total pair count.
    pub countable: bool,
}

impl Capabilities {
    /// A finite collection, or a node derived from one.
    pub const fn finite() -> Self {
        Self {
            restartable: true,
            countable: true,
        }
    }

    /// A single forward traversal only.
    pub const fn one_shot() -> Self {
        Self {
            restartable: false,
            countable: false,
        }
    }

    /// Capabilities of a node that must walk its upstream to count.
    pub const fn counted_by_traversal(upstream: Capabilities) -> Self {
        Self {
            restartable: upstream.restartable,
            countable: upstream.restartable,
        }
    }
}

/// Pull-based node.
///
/// Invariants:
/// - `pull` never reorders pairs relative to the node's upstream.
/// - After `pull` returns `Ok(None)` it keeps returning `Ok(None)` until a
///   successful `restart`.
/// - `count` reports the pairs a full traversal yields and leaves the node
///   positioned at the beginning.
pub trait Cursor<V> {
    /// Stable node name, used in error messages and traces.
    fn name(&self) -> &'static str;

    fn capabilities(&self) -> Capabilities;

    /// Produce the next pair, or `None` once exhausted.
    fn pull(&mut self) -> Result<Option<(Key, V)>>;

    /// Rewind to the beginning, resetting local state.
    fn restart(&mut self) -> Result<()>;

    /// Total pairs over a full traversal. The default walks the node once,
    /// so it is only available on restartable nodes.
    fn count(&mut self) -> Result<usize> {
        if !self.capabilities().restartable {
            return Err(Error::unsupported("count", self.name()));
        }
        self.restart()?;
        let mut n = 0usize;
        while self.pull()?.is_some() {
            n += 1;
        }
        self.restart()?;
        Ok(n)
    }

    /// Independent node over the same pipeline, positioned at the beginning.
    fn fork(&self) -> Result<Box<dyn Cursor<V>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_counting_follows_restartability() {
        assert_eq!(
            Capabilities::counted_by_traversal(Capabilities::finite()),
            Capabilities::finite()
        );
        assert_eq!(
            Capabilities::counted_by_traversal(Capabilities::one_shot()),
            Capabilities::one_shot()
        );
    }
}
