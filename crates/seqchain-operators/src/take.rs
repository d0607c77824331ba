//! TakeFirst / TakeLast operators.
//!
//! `TakeFirst` is an early-exhaustion guard and never looks ahead.
//! `TakeLast` has to know the upstream length before it can emit anything:
//! its first pull counts the whole upstream (one full traversal), rewinds,
//! and skips `total - n` pairs. It is therefore only built over upstreams
//! that can be both restarted and counted. An error while opening the
//! window exhausts the node until it is restarted.

use seqchain_core::error::{Error, Result};
use seqchain_core::key::Key;

use crate::metrics;
use crate::seq::Seq;
use crate::traits::{Capabilities, Cursor};

pub struct TakeFirst<V> {
    upstream: Seq<V>,
    limit: usize,
    taken: usize,
}

impl<V: 'static> TakeFirst<V> {
    pub fn new(upstream: Seq<V>, limit: usize) -> Self {
        Self {
            upstream,
            limit,
            taken: 0,
        }
    }
}

impl<V: 'static> Cursor<V> for TakeFirst<V> {
    fn name(&self) -> &'static str {
        "take_first"
    }

    fn capabilities(&self) -> Capabilities {
        self.upstream.capabilities()
    }

    fn pull(&mut self) -> Result<Option<(Key, V)>> {
        // Stop before touching the upstream once the quota is met.
        if self.taken >= self.limit {
            return Ok(None);
        }
        let next = self.upstream.next_pair()?;
        if next.is_some() {
            self.taken += 1;
        }
        Ok(next)
    }

    fn restart(&mut self) -> Result<()> {
        self.upstream.restart()?;
        self.taken = 0;
        Ok(())
    }

    fn count(&mut self) -> Result<usize> {
        let total = self.upstream.count()?;
        self.taken = 0;
        Ok(total.min(self.limit))
    }

    fn fork(&self) -> Result<Box<dyn Cursor<V>>> {
        Ok(Box::new(TakeFirst::new(self.upstream.fork()?, self.limit)))
    }
}

/// Skip/emit split computed from the upstream's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    skip: usize,
    emit: usize,
}

impl Window {
    const EMPTY: Window = Window { skip: 0, emit: 0 };

    fn new(total: usize, limit: usize) -> Self {
        Self {
            skip: total.saturating_sub(limit),
            emit: total.min(limit),
        }
    }
}

pub struct TakeLast<V> {
    upstream: Seq<V>,
    limit: usize,
    // `None` until the first pull after construction or restart.
    window: Option<Window>,
    emitted: usize,
}

impl<V: 'static> TakeLast<V> {
    /// Fails with `Error::Unsupported` unless `upstream` is restartable and
    /// countable.
    pub fn new(upstream: Seq<V>, limit: usize) -> Result<Self> {
        let caps = upstream.capabilities();
        if !(caps.restartable && caps.countable) {
            return Err(Error::Unsupported(format!(
                "take_last needs a restartable, countable upstream (got {})",
                upstream.name()
            )));
        }
        Ok(Self {
            upstream,
            limit,
            window: None,
            emitted: 0,
        })
    }

    /// Count the upstream, rewind it, and skip to the retained suffix.
    fn open(&mut self) -> Result<Window> {
        let window = if self.limit == 0 {
            Window::EMPTY
        } else {
            let total = self.upstream.count()?;
            let window = Window::new(total, self.limit);
            metrics::window(total, window.skip, window.emit);
            for _ in 0..window.skip {
                if self.upstream.next_pair()?.is_none() {
                    break;
                }
            }
            window
        };
        self.window = Some(window);
        self.emitted = 0;
        Ok(window)
    }
}

impl<V: 'static> Cursor<V> for TakeLast<V> {
    fn name(&self) -> &'static str {
        "take_last"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::finite()
    }

    fn pull(&mut self) -> Result<Option<(Key, V)>> {
        let window = match self.window {
            Some(w) => w,
            None => match self.open() {
                Ok(w) => w,
                Err(e) => {
                    self.window = Some(Window::EMPTY);
                    self.emitted = 0;
                    return Err(e);
                }
            },
        };
        if self.emitted >= window.emit {
            return Ok(None);
        }
        let next = self.upstream.next_pair()?;
        if next.is_some() {
            self.emitted += 1;
        }
        Ok(next)
    }

    fn restart(&mut self) -> Result<()> {
        self.upstream.restart()?;
        self.window = None;
        self.emitted = 0;
        Ok(())
    }

    fn count(&mut self) -> Result<usize> {
        let total = self.upstream.count()?;
        self.window = None;
        self.emitted = 0;
        Ok(total.min(self.limit))
    }

    fn fork(&self) -> Result<Box<dyn Cursor<V>>> {
        Ok(Box::new(TakeLast::new(self.upstream.fork()?, self.limit)?))
    }
}
