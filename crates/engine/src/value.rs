//! The slice of the host's generic value wrapper this workspace needs to
//! exercise type checking at the command boundary.
//!
//! The real RiptideKV keyspace stores many value kinds behind one generic
//! object wrapper; reproducing that wrapper is explicitly out of scope
//! (see the core's non-goals). `Value` here is the minimum needed to make
//! [`crate::error::CommandError::WrongType`] testable: a bloom variant,
//! and a stand-in for "anything else".

use bloom::BloomChain;

/// A value bound to a key in the harness keyspace.
#[derive(Debug, Clone)]
pub enum Value {
    /// A scalable partitioned Bloom filter.
    Bloom(BloomChain),
    /// Any other value kind the host might store at this key (a plain
    /// string, in this harness). Exists only so `WrongType` has something
    /// to reject in tests.
    Other(Vec<u8>),
}

impl Value {
    /// Returns the bloom chain, or `None` if this value holds something
    /// else.
    #[must_use]
    pub fn as_bloom(&self) -> Option<&BloomChain> {
        match self {
            Value::Bloom(c) => Some(c),
            Value::Other(_) => None,
        }
    }

    /// Mutable counterpart of [`Value::as_bloom`].
    pub fn as_bloom_mut(&mut self) -> Option<&mut BloomChain> {
        match self {
            Value::Bloom(c) => Some(c),
            Value::Other(_) => None,
        }
    }
}
