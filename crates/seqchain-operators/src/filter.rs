//! Filter operator.
//!
//! Emitted pairs keep their upstream keys; gaps left by rejected pairs are
//! not re-indexed.

use std::rc::Rc;

use seqchain_core::error::Result;
use seqchain_core::key::Key;

use crate::seq::Seq;
use crate::traits::{Capabilities, Cursor};

pub struct Filter<V> {
    upstream: Seq<V>,
    predicate: Rc<dyn Fn(&V) -> Result<bool>>,
}

impl<V: 'static> Filter<V> {
    pub fn new(upstream: Seq<V>, predicate: Rc<dyn Fn(&V) -> Result<bool>>) -> Self {
        Self {
            upstream,
            predicate,
        }
    }
}

impl<V: 'static> Cursor<V> for Filter<V> {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::counted_by_traversal(self.upstream.capabilities())
    }

    fn pull(&mut self) -> Result<Option<(Key, V)>> {
        while let Some((k, v)) = self.upstream.next_pair()? {
            if (self.predicate)(&v)? {
                return Ok(Some((k, v)));
            }
        }
        Ok(None)
    }

    fn restart(&mut self) -> Result<()> {
        self.upstream.restart()
    }

    fn fork(&self) -> Result<Box<dyn Cursor<V>>> {
        Ok(Box::new(Filter {
            upstream: self.upstream.fork()?,
            predicate: Rc::clone(&self.predicate),
        }))
    }
}
