#[cfg(test)]
mod tests;

use crate::value::Value;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// EntityKey
///
/// Canonical lookup key for one entity id.
///
/// Numeric ids and their decimal string form denote the same key: `1`, `1u64`,
/// `1.0` and `"1"` all canonicalize to `"1"`, and `1.5` to `"1.5"`. This is the single point where
/// ids are normalized before touching the store or the cache.
///
/// Ordering follows store enumeration: array-index-like keys (canonical
/// decimal integers below 2^32 - 1) first in numeric order, then every other
/// key in lexicographic order.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    /// Largest array-index-like key value, exclusive.
    const INDEX_LIMIT: u64 = (1u64 << 32) - 1;

    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Canonicalize a scalar selector into a key.
    ///
    /// Returns `None` for values that cannot name an entity (null, bool,
    /// non-finite floats, lists, maps).
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(Self(i.to_string())),
            Value::Uint(u) => Some(Self(u.to_string())),
            Value::Float64(f) if f.is_finite() => Some(Self(Self::float_text(*f))),
            Value::Text(s) => Some(Self(s.clone())),
            _ => None,
        }
    }

    // Shortest round-trip decimal, never in exponent form; whole values print
    // without a fraction, so `4567.0` matches `4567`. Negative zero is `0`.
    fn float_text(f: f64) -> String {
        if f == 0.0 {
            "0".to_string()
        } else {
            f.to_string()
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric index for array-index-like keys.
    fn index(&self) -> Option<u64> {
        let s = self.0.as_str();
        if s.is_empty() || (s.len() > 1 && s.starts_with('0')) {
            return None;
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        s.parse::<u64>().ok().filter(|n| *n < Self::INDEX_LIMIT)
    }
}

impl Ord for EntityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.index(), other.index()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for EntityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for EntityKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Implements `From<T> for EntityKey` for integer ids.
macro_rules! impl_from_int_key {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl From<$ty> for EntityKey {
                fn from(v: $ty) -> Self {
                    Self(v.to_string())
                }
            }
        )*
    }
}

impl_from_int_key!(i32, i64, u32, u64, usize);
