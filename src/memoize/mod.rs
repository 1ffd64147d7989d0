//! Memoization of functions by argument list.
//!
//! [`memoize`] wraps a function with a cache that is created empty, grows on
//! every miss and is never evicted. The wrapped function runs at most once
//! per distinct cache key for the wrapper's lifetime.
//!
//! # Overview
//!
//! - [`Memoized`]: single-threaded wrapper for infallible functions
//! - [`TryMemoized`]: single-threaded wrapper that caches only `Ok` results
//! - [`ConcurrentMemoized`]: `Send + Sync` wrapper, requires the
//!   `concurrent` feature
//!
//! # Cache Keys
//!
//! How arguments map to keys is a [`KeyPolicy`]:
//!
//! - [`Structural`] (default): the arguments themselves, compared by `Eq`
//! - [`KeyFn`]: a caller-supplied canonicalization function
//! - [`Canonical`]: sorted-key JSON via serde, requires the `serde` feature.
//!   Maps with the same entries share a key whatever their insertion order.
//!
//! # Independence
//!
//! Each wrapper owns its cache. Wrapping the same function twice yields two
//! caches that share nothing:
//!
//! ```rust
//! use curry_memo::memoize;
//!
//! fn add((first, second): (i32, i32)) -> i32 {
//!     first + second
//! }
//!
//! let left = memoize(add);
//! let right = memoize(add);
//!
//! left.call((2, 1));
//! assert_eq!(left.len(), 1);
//! assert!(right.is_empty());
//! ```
//!
//! # Hashers
//!
//! Caches use the standard `RandomState` hasher, `FxBuildHasher` with the
//! `fxhash` feature, or `ahash::RandomState` with the `ahash` feature.
//! `fxhash` takes precedence when both are enabled.

mod cache;
#[cfg(feature = "serde")]
mod canonical;
#[cfg(feature = "concurrent")]
mod concurrent;
mod error;
mod key;
mod memoized;

#[cfg(feature = "serde")]
pub use canonical::{CacheKey, Canonical};
#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentMemoized;
pub use error::{KeyDerivationError, MemoizeError};
pub use key::{KeyFn, KeyPolicy, Structural};
pub use memoized::{Memoized, TryMemoized};

/// The `BuildHasher` used by every memo cache.
#[cfg(feature = "fxhash")]
pub type CacheHasher = rustc_hash::FxBuildHasher;

/// The `BuildHasher` used by every memo cache.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type CacheHasher = ahash::RandomState;

/// The `BuildHasher` used by every memo cache.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type CacheHasher = std::collections::hash_map::RandomState;

/// Wraps `function` with a cache keyed by its arguments.
///
/// Functions of several arguments take them as one tuple. Arguments must be
/// `Clone + Hash + Eq`; see [`Memoized::with_policy`] for other key
/// policies.
///
/// # Examples
///
/// ```rust
/// use curry_memo::memoize;
///
/// let winner = memoize(|(first, second): (i32, i32)| {
///     if first >= second { format!("{first} wins") } else { format!("{second} wins") }
/// });
///
/// assert_eq!(winner.call((5, 7)), "7 wins");
/// assert_eq!(winner.call((7, 5)), "7 wins");
/// assert_eq!(winner.len(), 2);
/// ```
pub fn memoize<Args, R, F>(function: F) -> Memoized<Args, R, F>
where
    Args: Clone + std::hash::Hash + Eq,
    R: Clone,
    F: Fn(Args) -> R,
{
    Memoized::new(function)
}

/// Wraps a fallible `function` with a cache of its successes.
///
/// Errors are returned verbatim and never cached.
///
/// # Examples
///
/// ```rust
/// use curry_memo::try_memoize;
///
/// let reciprocal = try_memoize(|value: i64| {
///     if value == 0 { Err("division by zero") } else { Ok(1.0 / value as f64) }
/// });
///
/// assert_eq!(reciprocal.call(0), Err("division by zero"));
/// assert_eq!(reciprocal.call(4), Ok(0.25));
/// assert_eq!(reciprocal.len(), 1);
/// ```
pub fn try_memoize<Args, T, E, F>(function: F) -> TryMemoized<Args, T, E, F>
where
    Args: Clone + std::hash::Hash + Eq,
    T: Clone,
    F: Fn(Args) -> Result<T, E>,
{
    TryMemoized::new(function)
}
