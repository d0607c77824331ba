//! `Seq`: the chain composer.
//!
//! Every source and every operator is reachable through the same handle, so
//! any operator can sit on top of any other. Chain calls consume the handle
//! and return a new one wrapping it as upstream; nothing is evaluated until
//! pairs are pulled.

use std::rc::Rc;

use serde::Serialize;

use seqchain_core::config::SeqConfig;
use seqchain_core::error::{BoxError, Error, Result};
use seqchain_core::key::Key;
use seqchain_core::keyed::KeyedArray;

use crate::distinct::Distinct;
use crate::filter::Filter;
use crate::map::Transform;
use crate::materialize;
use crate::metrics;
use crate::take::{TakeFirst, TakeLast};
use crate::traits::{Capabilities, Cursor};

/// Handle to a node of a lazy chain.
pub struct Seq<V> {
    cursor: Box<dyn Cursor<V>>,
    // Filled by `has_more`; handed out by the next pull.
    peeked: Option<(Key, V)>,
    config: SeqConfig,
}

impl<V> std::fmt::Debug for Seq<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seq")
            .field("node", &self.cursor.name())
            .field("capabilities", &self.cursor.capabilities())
            .field("peeked", &self.peeked.is_some())
            .finish()
    }
}

impl<V: 'static> Seq<V> {
    /// Wrap any external source implementing the enumeration contract.
    pub fn from_cursor(cursor: Box<dyn Cursor<V>>) -> Self {
        Self::with_parts(cursor, SeqConfig::default())
    }

    pub(crate) fn with_parts(cursor: Box<dyn Cursor<V>>, config: SeqConfig) -> Self {
        metrics::node_built(cursor.name(), cursor.capabilities());
        Self {
            cursor,
            peeked: None,
            config,
        }
    }

    /// Replace the config this node (and every node chained on it) uses.
    pub fn with_config(mut self, config: SeqConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SeqConfig {
        &self.config
    }

    pub fn name(&self) -> &'static str {
        self.cursor.name()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.cursor.capabilities()
    }

    pub fn is_restartable(&self) -> bool {
        self.capabilities().restartable
    }

    pub fn is_countable(&self) -> bool {
        self.capabilities().countable
    }

    // ---- pull surface ----

    /// Pull the next pair.
    pub fn next_pair(&mut self) -> Result<Option<(Key, V)>> {
        if let Some(pair) = self.peeked.take() {
            return Ok(Some(pair));
        }
        self.cursor.pull()
    }

    /// Whether another pair remains. May pull one pair ahead and hold it.
    pub fn has_more(&mut self) -> Result<bool> {
        if self.peeked.is_some() {
            return Ok(true);
        }
        match self.cursor.pull()? {
            Some(pair) => {
                self.peeked = Some(pair);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Rewind to the beginning. Recursively restarts upstream nodes.
    pub fn restart(&mut self) -> Result<()> {
        self.cursor.restart()?;
        self.peeked = None;
        Ok(())
    }

    /// Total pairs over a full traversal; leaves the node at the beginning.
    pub fn count(&mut self) -> Result<usize> {
        let n = self.cursor.count()?;
        self.peeked = None;
        Ok(n)
    }

    /// Independent handle over the same restartable pipeline, at its start.
    pub fn fork(&self) -> Result<Seq<V>> {
        Ok(Self::with_parts(self.cursor.fork()?, self.config.clone()))
    }

    /// Borrowing iterator over the remaining pairs. Does not restart.
    pub fn pairs(&mut self) -> Pairs<'_, V> {
        Pairs { seq: self }
    }

    // ---- chain methods ----

    /// Map every value through `f`; keys and order pass through.
    pub fn transform<U, F>(self, f: F) -> Seq<U>
    where
        U: 'static,
        F: Fn(V) -> U + 'static,
    {
        self.chain_transform::<U>(Rc::new(move |v: V| -> Result<U> { Ok(f(v)) }))
    }

    /// Like [`Seq::transform`], but `f` may fail; the failure surfaces at
    /// the pull that evaluated it.
    pub fn try_transform<U, E, F>(self, f: F) -> Seq<U>
    where
        U: 'static,
        E: Into<BoxError>,
        F: Fn(V) -> std::result::Result<U, E> + 'static,
    {
        self.chain_transform::<U>(Rc::new(move |v: V| f(v).map_err(Error::callback)))
    }

    fn chain_transform<U: 'static>(self, f: Rc<dyn Fn(V) -> Result<U>>) -> Seq<U> {
        let config = self.config.clone();
        Seq::with_parts(Box::new(Transform::new(self, f)), config)
    }

    /// Keep pairs whose value satisfies `predicate`. Keys are preserved.
    pub fn filter<P>(self, predicate: P) -> Seq<V>
    where
        P: Fn(&V) -> bool + 'static,
    {
        self.chain_filter(Rc::new(move |v: &V| -> Result<bool> { Ok(predicate(v)) }))
    }

    pub fn try_filter<E, P>(self, predicate: P) -> Seq<V>
    where
        E: Into<BoxError>,
        P: Fn(&V) -> std::result::Result<bool, E> + 'static,
    {
        self.chain_filter(Rc::new(move |v: &V| predicate(v).map_err(Error::callback)))
    }

    fn chain_filter(self, predicate: Rc<dyn Fn(&V) -> Result<bool>>) -> Seq<V> {
        let config = self.config.clone();
        Seq::with_parts(Box::new(Filter::new(self, predicate)), config)
    }

    /// First occurrence of each distinct value, by content digest.
    pub fn distinct(self) -> Seq<V>
    where
        V: Serialize,
    {
        self.chain_distinct::<V>(Rc::new(|v: V| -> Result<V> { Ok(v) }))
    }

    /// Emit `f(v)`, keeping the first occurrence of each distinct output.
    pub fn distinct_with<U, F>(self, f: F) -> Seq<U>
    where
        U: Serialize + 'static,
        F: Fn(V) -> U + 'static,
    {
        self.chain_distinct::<U>(Rc::new(move |v: V| -> Result<U> { Ok(f(v)) }))
    }

    pub fn try_distinct_with<U, E, F>(self, f: F) -> Seq<U>
    where
        U: Serialize + 'static,
        E: Into<BoxError>,
        F: Fn(V) -> std::result::Result<U, E> + 'static,
    {
        self.chain_distinct::<U>(Rc::new(move |v: V| f(v).map_err(Error::callback)))
    }

    fn chain_distinct<U>(self, f: Rc<dyn Fn(V) -> Result<U>>) -> Seq<U>
    where
        U: Serialize + 'static,
    {
        let config = self.config.clone();
        let node = Distinct::new(self, f, config.distinct_capacity_hint);
        Seq::with_parts(Box::new(node), config)
    }

    /// At most the first `n` pairs.
    pub fn take_first(self, n: usize) -> Seq<V> {
        let config = self.config.clone();
        Seq::with_parts(Box::new(TakeFirst::new(self, n)), config)
    }

    /// The final `min(n, total)` pairs, in upstream order.
    ///
    /// Fails with `Error::Unsupported` when this node cannot be restarted
    /// and counted (a one-shot producer anywhere below it). The first pull
    /// walks the whole upstream once to count it.
    pub fn take_last(self, n: usize) -> Result<Seq<V>> {
        let config = self.config.clone();
        let node = TakeLast::new(self, n)?;
        Ok(Seq::with_parts(Box::new(node), config))
    }

    // ---- terminal ----

    /// Drain from the current position into a keyed array.
    pub fn to_array(&mut self) -> Result<KeyedArray<V>> {
        materialize::to_array(self)
    }

    /// Drain the remaining values in emission order, ignoring keys.
    pub fn to_vec(&mut self) -> Result<Vec<V>> {
        materialize::to_vec(self)
    }
}

/// Iterator over the remaining pairs of a [`Seq`].
pub struct Pairs<'a, V> {
    seq: &'a mut Seq<V>,
}

impl<'a, V: 'static> Iterator for Pairs<'a, V> {
    type Item = Result<(Key, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.seq.next_pair().transpose()
    }
}

/// Owning iterator over the remaining pairs of a [`Seq`].
pub struct IntoPairs<V> {
    seq: Seq<V>,
}

impl<V: 'static> Iterator for IntoPairs<V> {
    type Item = Result<(Key, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.seq.next_pair().transpose()
    }
}

impl<V: 'static> IntoIterator for Seq<V> {
    type Item = Result<(Key, V)>;
    type IntoIter = IntoPairs<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoPairs { seq: self }
    }
}

impl<'a, V: 'static> IntoIterator for &'a mut Seq<V> {
    type Item = Result<(Key, V)>;
    type IntoIter = Pairs<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs()
    }
}
