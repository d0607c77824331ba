//! Source adapters: finite keyed arrays, one-shot generators, and integer
//! ranges.
//!
//! Array sources are restartable and answer `count` in O(1). Generators
//! support a single forward traversal; restarting one is allowed only while
//! it has not produced anything yet.

use std::rc::Rc;

use seqchain_core::config::SeqConfig;
use seqchain_core::error::{Error, Result};
use seqchain_core::key::Key;
use seqchain_core::keyed::KeyedArray;

use crate::seq::Seq;
use crate::traits::{Capabilities, Cursor};

/// Restartable source over a shared, immutable list of pairs.
pub struct ArraySource<V> {
    items: Rc<[(Key, V)]>,
    pos: usize,
}

impl<V> ArraySource<V> {
    pub fn new(pairs: Vec<(Key, V)>) -> Self {
        Self {
            items: pairs.into(),
            pos: 0,
        }
    }
}

impl<V: Clone + 'static> Cursor<V> for ArraySource<V> {
    fn name(&self) -> &'static str {
        "array"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::finite()
    }

    fn pull(&mut self) -> Result<Option<(Key, V)>> {
        let Some(pair) = self.items.get(self.pos) else {
            return Ok(None);
        };
        self.pos += 1;
        Ok(Some(pair.clone()))
    }

    fn restart(&mut self) -> Result<()> {
        self.pos = 0;
        Ok(())
    }

    fn count(&mut self) -> Result<usize> {
        self.pos = 0;
        Ok(self.items.len())
    }

    fn fork(&self) -> Result<Box<dyn Cursor<V>>> {
        Ok(Box::new(ArraySource {
            items: Rc::clone(&self.items),
            pos: 0,
        }))
    }
}

/// One-shot source over a lazy producer.
pub struct GeneratorSource<V> {
    producer: Box<dyn Iterator<Item = (Key, V)>>,
    advanced: bool,
    done: bool,
}

impl<V> GeneratorSource<V> {
    pub fn new<I>(producer: I) -> Self
    where
        I: IntoIterator<Item = (Key, V)>,
        I::IntoIter: 'static,
    {
        Self {
            producer: Box::new(producer.into_iter()),
            advanced: false,
            done: false,
        }
    }
}

impl<V: 'static> Cursor<V> for GeneratorSource<V> {
    fn name(&self) -> &'static str {
        "generator"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::one_shot()
    }

    fn pull(&mut self) -> Result<Option<(Key, V)>> {
        if self.done {
            return Ok(None);
        }
        self.advanced = true;
        let next = self.producer.next();
        if next.is_none() {
            self.done = true;
        }
        Ok(next)
    }

    fn restart(&mut self) -> Result<()> {
        // Rewinding a producer that has not started is a no-op.
        if self.advanced {
            return Err(Error::unsupported("restart after first pull", self.name()));
        }
        Ok(())
    }

    fn count(&mut self) -> Result<usize> {
        Err(Error::unsupported("count", self.name()))
    }

    fn fork(&self) -> Result<Box<dyn Cursor<V>>> {
        Err(Error::unsupported("fork", self.name()))
    }
}

impl<V: Clone + 'static> Seq<V> {
    /// Restartable sequence over `values`, keyed `0..n`.
    pub fn from_array(values: Vec<V>) -> Self {
        Self::from_pairs(
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (Key::from(i), v))
                .collect(),
        )
    }

    /// Restartable sequence over explicit pairs, in the given order.
    /// Duplicate keys are kept as separate pairs.
    pub fn from_pairs(pairs: Vec<(Key, V)>) -> Self {
        Seq::with_parts(Box::new(ArraySource::new(pairs)), SeqConfig::default())
    }

    /// Restartable sequence over a materialized keyed array.
    pub fn from_keyed(array: KeyedArray<V>) -> Self {
        Self::from_pairs(array.into_pairs())
    }
}

impl<V: 'static> Seq<V> {
    /// One-shot sequence over a lazy producer, keyed `0, 1, 2, ...` in
    /// production order.
    pub fn from_generator<I>(producer: I) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: 'static,
    {
        let keyed = producer
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Key::from(i), v));
        Self::from_keyed_generator(keyed)
    }

    /// One-shot sequence over a producer that supplies its own keys.
    pub fn from_keyed_generator<I>(producer: I) -> Self
    where
        I: IntoIterator<Item = (Key, V)>,
        I::IntoIter: 'static,
    {
        Seq::with_parts(
            Box::new(GeneratorSource::new(producer)),
            SeqConfig::default(),
        )
    }
}

impl<V: Clone + 'static> From<Vec<V>> for Seq<V> {
    fn from(values: Vec<V>) -> Self {
        Seq::from_array(values)
    }
}

impl<V: Clone + 'static> From<KeyedArray<V>> for Seq<V> {
    fn from(array: KeyedArray<V>) -> Self {
        Seq::from_keyed(array)
    }
}

impl Seq<i64> {
    /// `range_by(start, end, 1)`.
    pub fn range(start: i64, end: i64) -> Result<Self> {
        Self::range_by(start, end, 1)
    }

    /// Inclusive arithmetic range, eagerly expanded into an array source.
    ///
    /// The sign of `step` is ignored; the direction follows `start` and
    /// `end`. `end` is included when the step lands on it. A zero step is
    /// an `InvalidArgument` error.
    pub fn range_by(start: i64, end: i64, step: i64) -> Result<Self> {
        if step == 0 {
            return Err(Error::InvalidArgument(
                "range step must be non-zero".into(),
            ));
        }
        Ok(Self::from_array(expand_range(start, end, step.unsigned_abs())?))
    }
}

fn expand_range(start: i64, end: i64, step: u64) -> Result<Vec<i64>> {
    let too_large =
        || Error::InvalidArgument(format!("range {start}..={end} is too large to expand"));

    let (lo, hi) = (i128::from(start.min(end)), i128::from(start.max(end)));
    let step = i128::from(step);
    let len = usize::try_from((hi - lo) / step + 1).map_err(|_| too_large())?;

    let mut out = Vec::new();
    out.try_reserve_exact(len).map_err(|_| too_large())?;

    let ascending = start <= end;
    let first = i128::from(start);
    out.extend((0..len).map(|i| {
        let offset = step * i as i128;
        // Always within [lo, hi], so the cast back is lossless.
        (if ascending { first + offset } else { first - offset }) as i64
    }));
    Ok(out)
}
