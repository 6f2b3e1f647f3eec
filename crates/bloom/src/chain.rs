//! An ordered chain of [`Filter`]s that scales by appending, never
//! resizing.

use crate::error::{ChainError, MIN_ERROR};
use crate::filter::Filter;
use crate::hash;

/// Default target asymptotic false-positive rate for a newly created
/// chain, used when the caller never calls [`BloomChain::set_error`].
pub const DEFAULT_ERROR: f64 = 0.003;

/// The two states a chain can be in. `Empty` chains still accept
/// `set_error`; once `Growing`, the error rate is frozen for the rest of
/// the chain's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    /// No filters allocated yet; `e` may still be changed.
    Empty,
    /// At least one filter allocated; `e` is frozen.
    Growing,
}

/// A scalable, partitioned Bloom filter: a chain of [`Filter`]s where each
/// successive filter is larger and has a tighter target error, so the
/// chain's composite false-positive probability converges to `e`.
///
/// An element is "present" if *any* filter in the chain reports it as
/// present — inserts always go to the tail, and growth only ever appends.
#[derive(Debug, Clone)]
pub struct BloomChain {
    e: f64,
    filters: Vec<Filter>,
}

impl Default for BloomChain {
    fn default() -> Self {
        Self::new()
    }
}

impl BloomChain {
    /// Creates an empty chain with the default target error rate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            e: DEFAULT_ERROR,
            filters: Vec::new(),
        }
    }

    /// Current target asymptotic error rate.
    #[must_use]
    pub fn error(&self) -> f64 {
        self.e
    }

    /// Number of filters currently in the chain.
    #[must_use]
    pub fn numfilters(&self) -> u32 {
        self.filters.len() as u32
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ChainState {
        if self.filters.is_empty() {
            ChainState::Empty
        } else {
            ChainState::Growing
        }
    }

    /// Returns the `idx`-th filter in the chain, if it exists.
    #[must_use]
    pub fn filter(&self, idx: usize) -> Option<&Filter> {
        self.filters.get(idx)
    }

    /// Sets the target error rate. Only allowed while the chain is still
    /// [`ChainState::Empty`]; rejects values below [`MIN_ERROR`]; silently
    /// succeeds (no-op) if `e` already equals the requested value.
    pub fn set_error(&mut self, e: f64) -> Result<(), ChainError> {
        if e < MIN_ERROR {
            return Err(ChainError::ErrorTooSmall);
        }
        if e == self.e {
            return Ok(());
        }
        if self.state() == ChainState::Growing {
            return Err(ChainError::ErrorConflict);
        }
        self.e = e;
        Ok(())
    }

    /// Inserts `elem`, growing the chain if the tail filter is full.
    /// Returns whether `elem` was novel to the tail filter (the "updated"
    /// verdict used to compute `BFADD`'s reply).
    pub fn add(&mut self, elem: &[u8]) -> bool {
        self.ensure_tail_has_room();
        let h = hash::hash64(elem);
        self.filters
            .last_mut()
            .expect("ensure_tail_has_room always leaves a tail")
            .add(h)
    }

    /// Tests whether `elem` may have been added to this chain. Short
    /// circuits on the first filter that reports a hit.
    #[must_use]
    pub fn exists(&self, elem: &[u8]) -> bool {
        let h = hash::hash64(elem);
        self.filters.iter().any(|f| f.contains(h))
    }

    /// Sums the per-filter cardinality estimates across the whole chain.
    #[must_use]
    pub fn card(&self) -> u64 {
        self.filters.iter().map(Filter::cardinality).sum()
    }

    fn ensure_tail_has_room(&mut self) {
        let needs_new_tail = match self.filters.last() {
            None => true,
            Some(tail) => tail.is_full(),
        };
        if needs_new_tail {
            let i = self.numfilters();
            let filter = Filter::at(self.e, i);
            tracing::debug!(
                "growing bloom chain: filter {i} k={} s={} bmax={}",
                filter.k(),
                filter.s(),
                filter.bmax()
            );
            self.filters.push(filter);
        }
    }
}
