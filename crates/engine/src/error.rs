//! The error taxonomy exposed at the command boundary.
//!
//! Every variant here is caller-visible and recoverable: none of them are
//! fatal, and none of them leave the keyspace or a chain partially
//! mutated (argument parsing always completes before any `BloomChain` is
//! touched — see [`crate::commands::bfadd`]).

use bloom::ChainError;
use thiserror::Error;

/// An error surfaced by the command surface to the caller.
///
/// `Display` renders each variant as the literal reply string a client
/// would see, matching the wire contract in the external interface
/// specification.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    /// Malformed argument list: a missing option value, or an option the
    /// command doesn't recognize.
    #[error("ERR {0}")]
    BadArgument(String),
    /// A numeric argument fell outside its accepted range.
    #[error("ERR {0}")]
    OutOfRange(String),
    /// An attempt to change a chain's frozen error rate.
    #[error("ERR {0}")]
    ErrorConflict(String),
    /// The key exists but does not hold a bloom filter.
    #[error("WRONGTYPE {0}")]
    WrongType(String),
    /// `BFDEBUG` was issued against a key that does not exist.
    #[error("ERR {0}")]
    MissingKey(String),
}

impl CommandError {
    /// Builds the standard "key holds the wrong type" error for `key`.
    #[must_use]
    pub fn wrong_type(key: &str) -> Self {
        CommandError::WrongType(format!(
            "Operation against a key ({key}) holding the wrong kind of value"
        ))
    }

    /// Builds the standard "no such key" error for `key`.
    #[must_use]
    pub fn missing_key(key: &str) -> Self {
        CommandError::MissingKey(format!("no such key: {key}"))
    }
}

impl From<ChainError> for CommandError {
    fn from(e: ChainError) -> Self {
        match e {
            ChainError::ErrorTooSmall => CommandError::OutOfRange("error too small".to_string()),
            ChainError::ErrorConflict => {
                CommandError::ErrorConflict("cannot change error on existing bloom filter".to_string())
            }
        }
    }
}
