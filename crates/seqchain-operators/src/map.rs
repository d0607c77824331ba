//! Transform operator: `(k, v)` becomes `(k, f(v))`.

use std::rc::Rc;

use seqchain_core::error::Result;
use seqchain_core::key::Key;

use crate::seq::Seq;
use crate::traits::{Capabilities, Cursor};

pub struct Transform<V, U> {
    upstream: Seq<V>,
    f: Rc<dyn Fn(V) -> Result<U>>,
}

impl<V: 'static, U: 'static> Transform<V, U> {
    pub fn new(upstream: Seq<V>, f: Rc<dyn Fn(V) -> Result<U>>) -> Self {
        Self { upstream, f }
    }
}

impl<V: 'static, U: 'static> Cursor<U> for Transform<V, U> {
    fn name(&self) -> &'static str {
        "transform"
    }

    fn capabilities(&self) -> Capabilities {
        self.upstream.capabilities()
    }

    fn pull(&mut self) -> Result<Option<(Key, U)>> {
        match self.upstream.next_pair()? {
            Some((k, v)) => Ok(Some((k, (self.f)(v)?))),
            None => Ok(None),
        }
    }

    fn restart(&mut self) -> Result<()> {
        self.upstream.restart()
    }

    // Cardinality is unchanged, so an O(1) upstream count stays O(1).
    fn count(&mut self) -> Result<usize> {
        self.upstream.count()
    }

    fn fork(&self) -> Result<Box<dyn Cursor<U>>> {
        Ok(Box::new(Transform {
            upstream: self.upstream.fork()?,
            f: Rc::clone(&self.f),
        }))
    }
}
