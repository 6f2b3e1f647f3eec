//! Implementations of the five `BF*` verbs against a [`Store`].
//!
//! Every function here takes already-tokenized arguments (the `cli` crate
//! owns whitespace splitting) and returns a [`Reply`] or a
//! [`CommandError`]. Argument validation always completes before any
//! `BloomChain` is touched, so a rejected command never leaves a chain
//! half-updated.

use crate::error::CommandError;
use crate::reply::Reply;
use crate::store::Store;

/// `BFADD key [ERROR e] [ELEMENTS v1 v2 …]`.
///
/// See the external interface documentation for the exact reply and error
/// semantics; summarized: the reply is the number of elements the tail
/// filter considered novel, except that creating a key with no elements
/// still counts as one update.
pub fn bfadd(store: &mut Store, args: &[&str]) -> Result<Reply, CommandError> {
    let (key, error_opt, elements) = parse_bfadd_args(args)?;

    let existed = store.contains_key(key);
    let chain = store.bloom_or_create(key)?;

    if let Some(e) = error_opt {
        if existed {
            if (e - chain.error()).abs() > f64::EPSILON {
                tracing::warn!("BFADD {key}: error-rate conflict (stored {}, requested {e})", chain.error());
                return Err(CommandError::ErrorConflict(
                    "cannot change error on existing bloom filter".to_string(),
                ));
            }
        } else {
            chain.set_error(e).map_err(|err| {
                tracing::warn!("BFADD {key}: {err}");
                CommandError::from(err)
            })?;
        }
    }

    let mut novel = 0i64;
    for elem in &elements {
        if chain.add(elem.as_bytes()) {
            novel += 1;
        }
    }

    if elements.is_empty() && !existed {
        Ok(Reply::Integer(1))
    } else {
        Ok(Reply::Integer(novel))
    }
}

/// `BFEXIST key value`.
pub fn bfexist(store: &Store, key: &str, value: &str) -> Result<Reply, CommandError> {
    match store.bloom(key)? {
        None => Ok(Reply::Integer(0)),
        Some(chain) => Ok(Reply::Integer(i64::from(chain.exists(value.as_bytes())))),
    }
}

/// `BFCOUNT key`.
pub fn bfcount(store: &Store, key: &str) -> Result<Reply, CommandError> {
    match store.bloom(key)? {
        None => Ok(Reply::Integer(0)),
        Some(chain) => Ok(Reply::Integer(chain.card() as i64)),
    }
}

/// `BFDEBUG STATUS key`.
pub fn bfdebug_status(store: &Store, key: &str) -> Result<Reply, CommandError> {
    let chain = store
        .bloom(key)?
        .ok_or_else(|| CommandError::missing_key(key))?;
    Ok(Reply::Bulk(format!(
        "n:{} e:{}",
        chain.numfilters(),
        format_g(chain.error())
    )))
}

/// `BFDEBUG FILTER key idx`.
pub fn bfdebug_filter(store: &Store, key: &str, idx: usize) -> Result<Reply, CommandError> {
    let chain = store
        .bloom(key)?
        .ok_or_else(|| CommandError::missing_key(key))?;
    let filter = chain
        .filter(idx)
        .ok_or_else(|| CommandError::OutOfRange(format!("filter index out of range: {idx}")))?;
    Ok(Reply::Bulk(format!(
        "k:{} s:{} b:{}",
        filter.k(),
        filter.s(),
        filter.b()
    )))
}

/// Splits `BFADD`'s argument list into `(key, error, elements)`.
fn parse_bfadd_args<'a>(
    args: &[&'a str],
) -> Result<(&'a str, Option<f64>, Vec<&'a str>), CommandError> {
    let key = *args
        .first()
        .ok_or_else(|| CommandError::BadArgument("wrong number of arguments".to_string()))?;
    let rest = &args[1..];

    let mut pos = 0;
    let mut error_opt = None;

    if rest.first() == Some(&"ERROR") {
        let raw = rest
            .get(1)
            .ok_or_else(|| CommandError::BadArgument("no error specified".to_string()))?;
        let e: f64 = raw
            .parse()
            .map_err(|_| CommandError::BadArgument(format!("invalid error value: {raw}")))?;
        error_opt = Some(e);
        pos = 2;
    }

    let elements = if rest.get(pos) == Some(&"ELEMENTS") {
        rest[pos + 1..].to_vec()
    } else if pos < rest.len() {
        return Err(CommandError::BadArgument(format!(
            "invalid option: {}",
            rest[pos]
        )));
    } else {
        Vec::new()
    };

    Ok((key, error_opt, elements))
}

/// Approximates C's `%g` formatting: the shortest decimal representation
/// that round-trips, switching to scientific notation for very small or
/// very large magnitudes the way `%g` does.
pub(crate) fn format_g(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }

    let exp = v.abs().log10().floor() as i32;
    if exp < -4 || exp >= 6 {
        let mantissa_exp = format!("{v:e}");
        // Rust renders `1.5e-3` rather than C's `1.5e-03`; %g-equivalent
        // for our purposes only needs to be unambiguous, not byte-identical.
        trim_trailing_zeros(&mantissa_exp)
    } else {
        let decimals = (6 - exp - 1).max(0) as usize;
        let fixed = format!("{v:.decimals$}");
        trim_trailing_zeros(&fixed)
    }
}

fn trim_trailing_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    let (mantissa, suffix) = match s.split_once('e') {
        Some((m, e)) => (m, Some(e)),
        None => (s, None),
    };
    let trimmed = mantissa.trim_end_matches('0');
    let trimmed = trimmed.trim_end_matches('.');
    match suffix {
        Some(e) => format!("{trimmed}e{e}"),
        None => trimmed.to_string(),
    }
}
