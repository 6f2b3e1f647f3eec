//! A minimal named-value keyspace binding [`BloomChain`]s to string keys.
//!
//! This stands in for the host's real keyspace (see [`crate::value`]):
//! enough to bind a chain to a key, type-check lookups, and create chains
//! lazily, and nothing more. No expiry, no notifications, no persistence.

use std::collections::HashMap;

use bloom::{BloomChain, DEFAULT_ERROR};

use crate::error::CommandError;
use crate::value::Value;

/// An in-process keyspace mapping names to [`Value`]s.
#[derive(Debug, Clone)]
pub struct Store {
    slots: HashMap<String, Value>,
    default_error: f64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates an empty keyspace using the compiled-in default error rate
    /// for chains created without an explicit `ERROR` option.
    #[must_use]
    pub fn new() -> Self {
        Self::with_default_error(DEFAULT_ERROR)
    }

    /// Creates an empty keyspace that applies `default_error` to chains
    /// created without an explicit `ERROR` option. Used by the `cli` binary
    /// to honor `BLOOM_DEFAULT_ERROR`.
    #[must_use]
    pub fn with_default_error(default_error: f64) -> Self {
        Self {
            slots: HashMap::new(),
            default_error,
        }
    }

    /// Looks up the bloom chain bound to `key`.
    ///
    /// Returns `Ok(None)` if `key` is unbound, `Ok(Some(chain))` if it is
    /// bound to a bloom filter, and `Err(WrongType)` if it is bound to
    /// something else.
    pub fn bloom(&self, key: &str) -> Result<Option<&BloomChain>, CommandError> {
        match self.slots.get(key) {
            None => Ok(None),
            Some(v) => v.as_bloom().map(Some).ok_or_else(|| CommandError::wrong_type(key)),
        }
    }

    /// Returns the bloom chain bound to `key`, creating an empty one if
    /// `key` is unbound. A freshly created chain starts with this store's
    /// configured `default_error` rather than the bare compiled-in
    /// constant. Still type-checks an existing binding first.
    pub fn bloom_or_create(&mut self, key: &str) -> Result<&mut BloomChain, CommandError> {
        if !self.slots.contains_key(key) {
            let mut chain = BloomChain::new();
            if (self.default_error - DEFAULT_ERROR).abs() > f64::EPSILON {
                chain.set_error(self.default_error)?;
            }
            self.slots.insert(key.to_string(), Value::Bloom(chain));
        } else if self.slots.get(key).and_then(Value::as_bloom).is_none() {
            return Err(CommandError::wrong_type(key));
        }

        Ok(self
            .slots
            .get_mut(key)
            .and_then(Value::as_bloom_mut)
            .expect("just verified key is bound to a bloom value"))
    }

    /// Binds a non-bloom value to `key`. Exists for tests exercising
    /// `WrongType`.
    pub fn set_other(&mut self, key: &str, data: Vec<u8>) {
        self.slots.insert(key.to_string(), Value::Other(data));
    }

    /// Removes any binding for `key`.
    pub fn remove(&mut self, key: &str) {
        self.slots.remove(key);
    }

    /// Whether `key` is bound to anything at all, regardless of type.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }
}
