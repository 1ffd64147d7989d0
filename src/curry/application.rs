//! The outcome of applying arguments to a curry link.

use std::fmt;

/// Result of [`Curried::apply`](super::Curried::apply).
///
/// A chain step either stays partial, yielding the next link, or completes,
/// yielding whatever the target function returned.
#[derive(Clone, PartialEq, Eq)]
pub enum Application<L, R> {
    /// The arity is not yet met. Contains the next link of the chain.
    Partial(L),
    /// The target function was invoked. Contains its result.
    Complete(R),
}

impl<L, R> Application<L, R> {
    /// Returns `true` if the chain is still accumulating arguments.
    #[inline]
    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }

    /// Returns `true` if the target function was invoked.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Returns the next link, or `None` if the chain completed.
    pub fn into_partial(self) -> Option<L> {
        match self {
            Self::Partial(link) => Some(link),
            Self::Complete(_) => None,
        }
    }

    /// Returns the target's result, or `None` if the chain is still partial.
    pub fn into_complete(self) -> Option<R> {
        match self {
            Self::Partial(_) => None,
            Self::Complete(result) => Some(result),
        }
    }

    /// Transforms a completed result, leaving partial links untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curry_memo::curry;
    ///
    /// let pair = curry(2, |arguments: Vec<&str>| arguments.join("-"));
    /// let shouted = pair.apply(["a", "b"]).map_complete(|joined| joined.to_uppercase());
    /// assert_eq!(shouted.into_complete(), Some("A-B".to_string()));
    /// ```
    pub fn map_complete<U, G>(self, function: G) -> Application<L, U>
    where
        G: FnOnce(R) -> U,
    {
        match self {
            Self::Partial(link) => Application::Partial(link),
            Self::Complete(result) => Application::Complete(function(result)),
        }
    }
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Application<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Partial(link) => formatter.debug_tuple("Partial").field(link).finish(),
            Self::Complete(result) => formatter.debug_tuple("Complete").field(result).finish(),
        }
    }
}
