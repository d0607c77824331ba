//! Distinct operator.
//!
//! Identity is the blake3 digest of a value's canonical JSON form, never
//! reference identity. The digest is taken of the value the node emits:
//! `f(v)` when a function is supplied, `v` otherwise. Two values with equal
//! digests are the same value; there is no second, full-equality check.
//!
//! Each pull consults the seen-set once per upstream pair, so the set is a
//! `HashSet` (O(1) average membership) rather than a list.

use std::collections::HashSet;
use std::rc::Rc;

use serde::Serialize;

use seqchain_core::error::Result;
use seqchain_core::hash::{digest_value, Digest};
use seqchain_core::key::Key;

use crate::metrics;
use crate::seq::Seq;
use crate::traits::{Capabilities, Cursor};

pub struct Distinct<V, U> {
    upstream: Seq<V>,
    f: Rc<dyn Fn(V) -> Result<U>>,
    seen: HashSet<Digest>,
    capacity_hint: usize,
}

impl<V: 'static, U: Serialize + 'static> Distinct<V, U> {
    pub fn new(upstream: Seq<V>, f: Rc<dyn Fn(V) -> Result<U>>, capacity_hint: usize) -> Self {
        Self {
            upstream,
            f,
            seen: HashSet::with_capacity(capacity_hint),
            capacity_hint,
        }
    }

    /// Distinct values emitted since the last restart.
    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }
}

impl<V: 'static, U: Serialize + 'static> Cursor<U> for Distinct<V, U> {
    fn name(&self) -> &'static str {
        "distinct"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::counted_by_traversal(self.upstream.capabilities())
    }

    fn pull(&mut self) -> Result<Option<(Key, U)>> {
        while let Some((k, v)) = self.upstream.next_pair()? {
            let out = (self.f)(v)?;
            let digest = digest_value(&out)?;
            if self.seen.insert(digest) {
                return Ok(Some((k, out)));
            }
            metrics::duplicate(&digest);
        }
        Ok(None)
    }

    fn restart(&mut self) -> Result<()> {
        self.upstream.restart()?;
        self.seen.clear();
        Ok(())
    }

    fn fork(&self) -> Result<Box<dyn Cursor<U>>> {
        Ok(Box::new(Distinct::new(
            self.upstream.fork()?,
            Rc::clone(&self.f),
            self.capacity_hint,
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Serialize;
    use seqchain_core::error::Error;

    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let arr = Seq::from_array(vec![3, 1, 3, 2, 1])
            .distinct()
            .to_array()
            .unwrap();
        assert_eq!(
            arr.into_pairs(),
            vec![(Key::Int(0), 3), (Key::Int(1), 1), (Key::Int(3), 2)]
        );
    }

    #[test]
    fn structurally_equal_values_collapse() {
        let mut a = HashMap::new();
        a.insert("x".to_string(), 1);
        a.insert("y".to_string(), 2);
        let mut b = HashMap::new();
        b.insert("y".to_string(), 2);
        b.insert("x".to_string(), 1);
        let mut c = HashMap::new();
        c.insert("x".to_string(), 9);

        let out = Seq::from_array(vec![a, b, c]).distinct().to_vec().unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].get("x"), Some(&9));
    }

    #[test]
    fn with_function_emits_and_digests_its_output() {
        let words = vec!["Apple", "avocado", "Banana", "blueberry", "cherry"];
        let arr = Seq::from_array(words)
            .distinct_with(|w: &str| w.chars().next().map(|c| c.to_ascii_lowercase()))
            .to_array()
            .unwrap();
        assert_eq!(
            arr.into_pairs(),
            vec![
                (Key::Int(0), Some('a')),
                (Key::Int(2), Some('b')),
                (Key::Int(4), Some('c')),
            ]
        );
    }

    #[derive(Serialize, Clone)]
    #[serde(untagged)]
    enum Loose {
        Missing(Option<i64>),
        Unit(()),
    }

    #[test]
    fn digest_collisions_are_treated_as_equal() {
        // Both render as JSON `null`; digest identity cannot separate them.
        let out = Seq::from_array(vec![Loose::Missing(None), Loose::Unit(())])
            .distinct()
            .to_vec()
            .unwrap();
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Loose::Missing(None)));
    }

    #[test]
    fn restart_clears_seen_set() {
        let mut seq = Seq::from_array(vec![1, 1, 2]).distinct();
        assert_eq!(seq.to_vec().unwrap(), vec![1, 2]);
        assert_eq!(seq.to_vec().unwrap(), Vec::<i32>::new());
        seq.restart().unwrap();
        assert_eq!(seq.to_vec().unwrap(), vec![1, 2]);
        assert_eq!(seq.count().unwrap(), 2);
    }

    #[test]
    fn all_duplicates_exhaust_cleanly() {
        let mut seq = Seq::from_array(vec![7; 100]).distinct();
        assert_eq!(seq.next_pair().unwrap(), Some((Key::Int(0), 7)));
        assert_eq!(seq.next_pair().unwrap(), None);
    }

    #[test]
    fn seen_set_tracks_distinct_values() {
        let upstream = Seq::from_array(vec!["a", "b", "a", "c"]);
        let identity: Rc<dyn Fn(&'static str) -> Result<&'static str>> =
            Rc::new(|v: &'static str| -> Result<&'static str> { Ok(v) });
        let mut node = Distinct::new(upstream, identity, 0);
        while node.pull().unwrap().is_some() {}
        assert_eq!(node.seen_len(), 3);
        node.restart().unwrap();
        assert_eq!(node.seen_len(), 0);
    }

    #[test]
    fn unserializable_output_is_digest_error() {
        let mut seq = Seq::from_array(vec![1]).distinct_with(|x| {
            let mut m = HashMap::new();
            m.insert(vec![x], x);
            m
        });
        assert!(matches!(seq.next_pair().unwrap_err(), Error::Digest(_)));
    }

    #[test]
    fn fallible_function_error_propagates() {
        let mut seq = Seq::from_generator(vec![1, -1])
            .try_distinct_with(|x: i32| u32::try_from(x));
        assert_eq!(seq.next_pair().unwrap(), Some((Key::Int(0), 1u32)));
        assert!(matches!(seq.next_pair().unwrap_err(), Error::Callback(_)));
    }
}
