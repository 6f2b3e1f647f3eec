//! The two reply shapes the command surface ever produces.

/// A reply to a successfully executed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A signed integer reply (`BFADD`, `BFEXIST`, `BFCOUNT`).
    Integer(i64),
    /// A bulk string reply (`BFDEBUG STATUS`, `BFDEBUG FILTER`).
    Bulk(String),
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Integer(n) => write!(f, "{n}"),
            Reply::Bulk(s) => write!(f, "{s}"),
        }
    }
}
