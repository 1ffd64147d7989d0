//! Serde-based canonical cache keys.
//!
//! [`Canonical`] serializes the argument list to JSON and renders it with
//! object keys sorted at every depth. Two argument lists share a key when
//! they serialize to the same JSON value, regardless of the order in which
//! their maps were populated.
//!
//! The encoding inherits JSON's limits: non-finite floats render as `null`,
//! and `Option<Option<T>>` cannot tell `None` from `Some(None)`.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::{KeyDerivationError, KeyPolicy};

/// Order-insensitive structural keys derived through serde.
///
/// Arguments need only implement [`Serialize`], so `HashMap` and other
/// non-`Hash` types can be memoized. Arguments that serde cannot encode as
/// JSON (for example a map with tuple keys) yield a [`KeyDerivationError`].
///
/// # Examples
///
/// ```rust
/// use curry_memo::memoize::{Canonical, KeyPolicy};
/// use std::collections::HashMap;
///
/// let mut first = HashMap::new();
/// first.insert("n", "a");
/// first.insert("m", "b");
///
/// let mut second = HashMap::new();
/// second.insert("m", "b");
/// second.insert("n", "a");
///
/// let key = Canonical.derive_key(&first).unwrap();
/// assert_eq!(key, Canonical.derive_key(&second).unwrap());
/// assert_eq!(key.as_str(), r#"{"m":"b","n":"a"}"#);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Canonical;

/// A canonical JSON rendering of an argument list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the rendered key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl<Args: Serialize> KeyPolicy<Args> for Canonical {
    type Key = CacheKey;
    type Error = KeyDerivationError;

    fn derive_key(&self, arguments: &Args) -> Result<CacheKey, KeyDerivationError> {
        let value = serde_json::to_value(arguments).map_err(|error| {
            debug!(target: "curry_memo::memoize", %error, "cannot serialize arguments");
            KeyDerivationError::from(error)
        })?;
        Ok(CacheKey(sort_keys(value).to_string()))
    }
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, nested)| (key, sort_keys(nested)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        scalar => scalar,
    }
}
