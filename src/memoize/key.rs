//! Cache key policies.
//!
//! A [`KeyPolicy`] decides when two argument lists are "the same call".
//! The choice is semantic: it fixes which calls share a cache entry.

use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Derives a cache key from an argument list.
///
/// Two argument lists hit the same cache entry exactly when their derived
/// keys are equal. A policy that cannot encode some input reports it through
/// [`Error`](Self::Error) instead of falling back to identity.
pub trait KeyPolicy<Args> {
    /// The key stored in the cache.
    type Key: Hash + Eq;
    /// Why a key could not be derived. `Infallible` for total policies.
    type Error;

    /// Derives the key for `arguments`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when `arguments` have no stable encoding.
    fn derive_key(&self, arguments: &Args) -> Result<Self::Key, Self::Error>;
}

/// Uses the argument value itself as the key.
///
/// Equality is the argument type's own `Eq`, which is structural for
/// tuples, vectors, strings and ordered collections. A `BTreeMap` argument
/// is therefore insertion-order insensitive; a `Vec` is order sensitive.
///
/// # Examples
///
/// ```rust
/// use curry_memo::memoize::{KeyPolicy, Structural};
///
/// let first = Structural.derive_key(&(1, "a")).unwrap();
/// let second = Structural.derive_key(&(1, "a")).unwrap();
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Structural;

impl<Args> KeyPolicy<Args> for Structural
where
    Args: Clone + Hash + Eq,
{
    type Key = Args;
    type Error = Infallible;

    #[inline]
    fn derive_key(&self, arguments: &Args) -> Result<Args, Infallible> {
        Ok(arguments.clone())
    }
}

/// Uses a caller-supplied canonicalization function as the key.
///
/// Useful when the arguments are not `Hash`, or when several argument
/// values should share one entry.
///
/// # Examples
///
/// ```rust
/// use curry_memo::memoize::{KeyFn, Memoized};
///
/// // Case-insensitive lookups share one entry.
/// let length = Memoized::with_policy(
///     |word: String| word.len(),
///     KeyFn::new(|word: &String| word.to_lowercase()),
/// );
/// assert_eq!(length.call("Rust".to_string()), 4);
/// assert!(length.contains(&"RUST".to_string()));
/// ```
pub struct KeyFn<G, K> {
    canonicalize: G,
    _key: PhantomData<fn() -> K>,
}

impl<G, K> KeyFn<G, K> {
    /// Wraps a canonicalization function.
    pub const fn new(canonicalize: G) -> Self {
        Self {
            canonicalize,
            _key: PhantomData,
        }
    }
}

impl<Args, G, K> KeyPolicy<Args> for KeyFn<G, K>
where
    G: Fn(&Args) -> K,
    K: Hash + Eq,
{
    type Key = K;
    type Error = Infallible;

    #[inline]
    fn derive_key(&self, arguments: &Args) -> Result<K, Infallible> {
        Ok((self.canonicalize)(arguments))
    }
}

impl<G: Clone, K> Clone for KeyFn<G, K> {
    fn clone(&self) -> Self {
        Self::new(self.canonicalize.clone())
    }
}

impl<G, K> fmt::Debug for KeyFn<G, K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("KeyFn").finish_non_exhaustive()
    }
}
