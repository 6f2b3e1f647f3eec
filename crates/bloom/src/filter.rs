//! A single ring in a [`crate::chain::BloomChain`]: `k` partitions, each of
//! `s` bits, behaving as one partitioned Bloom filter.

use crate::hash;
use crate::partition::Partition;

/// Bytes used to size the very first filter in a chain.
///
/// Chosen so that filter 0's total bit count is roughly `BASESIZE_BYTES *
/// 8` bits, independent of the target error rate.
pub const BASESIZE_BYTES: u64 = 2048;

/// Target fraction of set bits per partition at which a filter is
/// considered full and a new, larger filter is appended.
pub const P: f64 = 0.5;

/// Per-filter capacity growth factor across the chain.
pub const GROW: f64 = 2.0;

/// Per-filter error tightening factor across the chain.
pub const TIGHTEN: f64 = 0.85;

/// Derived geometric parameters for a filter at a given chain position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    /// Number of partitions (== number of hash functions).
    pub k: u32,
    /// Size of each partition, in bits.
    pub s: u32,
    /// Bit-fill threshold at which this filter is considered full.
    pub bmax: u64,
}

/// Derives `(k, s, bmax)` for filter index `i` (0-based) of a chain with
/// target asymptotic error `e`.
///
/// See the module-level documentation in [`crate`] for the derivation.
/// Pure function of `(e, i)` and the constants above — no shared state,
/// no randomness.
#[must_use]
pub fn derive_params(e: f64, i: u32) -> FilterParams {
    // ln(P) * ln(1-P); with P fixed at 0.5 this is ln(0.5)^2, but written
    // out so the formula stays legible if P is ever parameterized.
    let ln_p_ln_1mp = P.ln() * (1.0 - P).ln();

    let n0 = BASESIZE_BYTES as f64 * 8.0 * (ln_p_ln_1mp / e.ln().abs());
    let e0 = e * (1.0 - TIGHTEN) * 2.0;

    let n_i = n0 * GROW.powi(i as i32);
    let e_i = e0 * TIGHTEN.powi(i as i32);

    let k = (-e_i.log2()).ceil().max(1.0) as u32;
    let m_i = n_i / (ln_p_ln_1mp / e_i.ln().abs());
    let s = (m_i / k as f64).floor().max(1.0) as u32;
    let bmax = (s as f64 * k as f64 * P).floor() as u64;

    FilterParams { k, s, bmax }
}

/// One partitioned Bloom filter: `k` disjoint [`Partition`]s of `s` bits
/// each, plus the running fill counter used for both saturation and
/// cardinality estimation.
#[derive(Debug, Clone)]
pub struct Filter {
    k: u32,
    s: u32,
    b: u64,
    bmax: u64,
    parts: Vec<Partition>,
}

impl Filter {
    /// Builds a filter from already-derived parameters.
    #[must_use]
    pub fn new(params: FilterParams) -> Self {
        let parts = (0..params.k).map(|_| Partition::new(params.s)).collect();
        Self {
            k: params.k,
            s: params.s,
            b: 0,
            bmax: params.bmax,
            parts,
        }
    }

    /// Builds the filter for chain position `i` under target error `e`.
    #[must_use]
    pub fn at(e: f64, i: u32) -> Self {
        Self::new(derive_params(e, i))
    }

    /// Number of partitions (hash functions).
    #[must_use]
    pub fn k(&self) -> u32 {
        self.k
    }

    /// Bits per partition.
    #[must_use]
    pub fn s(&self) -> u32 {
        self.s
    }

    /// Total bits set across all partitions so far.
    #[must_use]
    pub fn b(&self) -> u64 {
        self.b
    }

    /// Bit-fill threshold at which this filter is considered full.
    #[must_use]
    pub fn bmax(&self) -> u64 {
        self.bmax
    }

    /// Total addressable bits: `s * k`.
    #[must_use]
    pub fn m(&self) -> u64 {
        self.s as u64 * self.k as u64
    }

    /// Whether this filter has reached its fill threshold and a new tail
    /// should be allocated before the next insert.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.b >= self.bmax
    }

    /// Inserts an already-computed hash. Returns `true` if at least one bit
    /// was newly set (the element was novel to *this* filter).
    pub fn add(&mut self, h: u64) -> bool {
        let mut newly_set = 0u64;
        for (j, bit) in DoubleHash::new(h, self.k, self.s).enumerate() {
            if !self.parts[j].set(bit) {
                newly_set += 1;
            }
        }
        self.b += newly_set;
        newly_set > 0
    }

    /// Tests whether an already-computed hash may be present in this
    /// filter. Short-circuits `false` on the first unset bit.
    #[must_use]
    pub fn contains(&self, h: u64) -> bool {
        for (j, bit) in DoubleHash::new(h, self.k, self.s).enumerate() {
            if !self.parts[j].get(bit) {
                return false;
            }
        }
        true
    }

    /// Estimates the number of distinct elements inserted, from observed
    /// bit-fill alone.
    #[must_use]
    pub fn cardinality(&self) -> u64 {
        if self.b == 0 {
            return 0;
        }

        let p = (self.b as f64 / self.bmax as f64) * P;
        if p >= 1.0 {
            // Should not occur while b <= bmax and P < 1; clamp rather than
            // feed -inf into the estimator.
            return u64::MAX / 2;
        }

        (self.s as f64 * -((1.0 - p).ln()) + 0.5).floor() as u64
    }
}

/// Kirsch–Mitzenmacher double hashing with the chain's specific
/// (non-textbook) affine recurrence, producing `k` bit indices in `[0,
/// s)`, one per partition.
struct DoubleHash {
    a: u32,
    b: u32,
    idx: u32,
    j: u32,
    k: u32,
    s: u32,
}

impl DoubleHash {
    fn new(h: u64, k: u32, s: u32) -> Self {
        let (a, b) = hash::split(h);
        Self {
            a,
            b,
            idx: a,
            j: 0,
            k,
            s,
        }
    }
}

impl Iterator for DoubleHash {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.j >= self.k {
            return None;
        }

        // Fast unbiased modulo: map idx into [0, s) without the bias of
        // idx % s for non-power-of-two s.
        let bit = ((self.idx as u64 * self.s as u64) >> 32) as usize;

        self.a = self.a.wrapping_add(self.b);
        self.b = self.b.wrapping_add(self.j);
        self.idx = self.a;
        self.j += 1;

        Some(bit)
    }
}
