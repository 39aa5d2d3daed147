use std::sync::atomic::{AtomicBool, Ordering};

use crate::cell::Cell;

/// Receives search progress. Both hooks have no-op defaults; any `FnMut(Cell)` closure is an
/// observer that records expansions and never stops the search.
pub trait SearchObserver {
    /// Called once per expanded cell, in expansion order.
    fn on_expand(&mut self, _cell: Cell) {}

    /// Polled once per expansion. Returning [true] ends the search with
    /// [SearchError::Cancelled](crate::SearchError::Cancelled).
    fn should_stop(&self) -> bool {
        false
    }
}

pub struct NoOpObserver;
impl SearchObserver for NoOpObserver {}

impl<F: FnMut(Cell)> SearchObserver for F {
    fn on_expand(&mut self, cell: Cell) {
        self(cell)
    }
}

/// Collects every reported expansion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionRecorder {
    pub expanded: Vec<Cell>,
}

impl SearchObserver for ExpansionRecorder {
    fn on_expand(&mut self, cell: Cell) {
        self.expanded.push(cell);
    }
}

/// Wraps another observer and stops the search once `flag` is raised, e.g. from another thread.
pub struct CancelFlag<'a, O> {
    flag: &'a AtomicBool,
    inner: O,
}

impl<'a, O: SearchObserver> CancelFlag<'a, O> {
    pub fn new(flag: &'a AtomicBool, inner: O) -> Self {
        CancelFlag { flag, inner }
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: SearchObserver> SearchObserver for CancelFlag<'_, O> {
    fn on_expand(&mut self, cell: Cell) {
        self.inner.on_expand(cell)
    }

    fn should_stop(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.inner.should_stop()
    }
}
