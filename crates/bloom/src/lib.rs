//! # Bloom
//!
//! A scalable (chained), partitioned Bloom filter for probabilistic set
//! membership testing.
//!
//! Unlike the older [`bloom::BloomFilter`] this crate used to export — a
//! single fixed-size filter sized up front from an expected item count —
//! this implementation grows automatically: when the active filter's bit
//! array reaches its configured fill ratio, a new, larger and tighter
//! filter is appended to the chain. An element is "present" if *any*
//! filter in the chain reports it.
//!
//! ## Usage in RiptideKV
//!
//! A [`BloomChain`] is meant to be wrapped as a server-side value object
//! bound to a key in the host keyspace (see the `engine` crate's
//! `BFADD`/`BFEXIST`/`BFCOUNT`/`BFDEBUG` command surface), not embedded
//! inside an SSTable the way the old single-shot filter was.
//!
//! ## Example
//!
//! ```rust
//! use bloom::BloomChain;
//!
//! let mut chain = BloomChain::new();
//! chain.set_error(0.01).unwrap();
//! chain.add(b"hello");
//! assert!(chain.exists(b"hello"));
//! assert!(!chain.exists(b"world"));
//! ```
//!
//! ## Module layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`hash`] | MurmurHash64A over opaque byte slices, fixed seed |
//! | [`partition`] | A single packed bit array |
//! | [`filter`] | `k` partitions + fill counters; parameter derivation |
//! | [`chain`] | The growable chain tying filters together |
//! | [`error`] | Errors the core itself can raise |

pub mod chain;
pub mod error;
pub mod filter;
pub mod hash;
pub mod partition;

pub use chain::{BloomChain, ChainState, DEFAULT_ERROR};
pub use error::{ChainError, MIN_ERROR};
pub use filter::{derive_params, Filter, FilterParams};
pub use hash::hash64;
pub use partition::Partition;

#[cfg(test)]
mod tests;
