//! Error types for the memoizer.
//!
//! Memoization adds exactly one failure of its own: the argument list could
//! not be turned into a cache key. Failures of the wrapped function are never
//! wrapped when the key policy is infallible, and are carried verbatim in
//! [`MemoizeError::Function`] otherwise.

/// The argument list could not be turned into a cache key.
///
/// Raised by fallible key policies such as
/// [`Canonical`](super::Canonical) when an argument has no stable encoding.
/// The wrapped function is not invoked and nothing is cached.
///
/// # Examples
///
/// ```rust
/// use curry_memo::memoize::KeyDerivationError;
///
/// let error = KeyDerivationError::new("key must be a string");
/// assert_eq!(
///     format!("{error}"),
///     "cannot derive cache key: key must be a string"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot derive cache key: {reason}")]
pub struct KeyDerivationError {
    reason: String,
}

impl KeyDerivationError {
    /// Creates an error with a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns why the key could not be derived.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for KeyDerivationError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(error.to_string())
    }
}

/// Failure of a memoized call that can fail in two places.
///
/// Returned by [`TryMemoized::try_call`](super::TryMemoized::try_call):
/// either the key policy rejected the arguments, or the wrapped function
/// returned an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoizeError<K, E> {
    /// The key policy could not derive a cache key.
    #[error("{0}")]
    KeyDerivation(K),
    /// The wrapped function returned an error.
    #[error("{0}")]
    Function(E),
}

impl<K, E> MemoizeError<K, E> {
    /// Returns the wrapped function's error, if that is what failed.
    pub fn into_function_error(self) -> Option<E> {
        match self {
            Self::KeyDerivation(_) => None,
            Self::Function(error) => Some(error),
        }
    }
}
