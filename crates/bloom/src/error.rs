//! Errors the core itself can raise.
//!
//! This is deliberately small: everything about *binding* a chain to a
//! named key, wrong-type checks, and missing-key handling belongs to the
//! host's command surface (the `engine` crate), not to the filter math.

use thiserror::Error;

/// Lower bound on the target asymptotic error rate a [`crate::chain::BloomChain`]
/// will accept.
pub const MIN_ERROR: f64 = 1e-10;

/// Errors raised while configuring or growing a [`crate::chain::BloomChain`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ChainError {
    /// `set_error` was called with a value below [`MIN_ERROR`].
    #[error("error too small")]
    ErrorTooSmall,
    /// `set_error` was called with a value different from the chain's
    /// already-frozen error rate.
    #[error("cannot change error on existing bloom filter")]
    ErrorConflict,
}
