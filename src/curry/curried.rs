//! A single link of a curry chain.

use std::fmt;

use tracing::trace;

use super::{Application, ReferenceCounter};

/// The wrapped function together with the arity captured at wrap time.
struct Target<F> {
    function: F,
    arity: usize,
}

/// One immutable link of a curry chain.
///
/// A link owns the arguments accumulated so far and shares the target
/// function with every other link of its chain. Applying arguments returns
/// a new link (or the final result) and leaves `self` untouched, so any link
/// can be reused as the start of several independent branches.
///
/// # Type Parameters
///
/// * `A` - The argument type accepted at every step of the chain
/// * `F` - The target function, `Fn(Vec<A>) -> R`
///
/// # Examples
///
/// ```rust
/// use curry_memo::curry;
///
/// fn describe(arguments: Vec<String>) -> String {
///     format!("{} wins against {}", arguments[0], arguments[1])
/// }
///
/// let versus = curry(2, describe);
/// let rust = versus.apply_one("rust".to_string()).into_partial().unwrap();
///
/// assert_eq!(
///     rust.apply_one("cobol".to_string()).into_complete(),
///     Some("rust wins against cobol".to_string())
/// );
/// assert_eq!(rust.remaining(), 1);
/// ```
pub struct Curried<A, F> {
    target: ReferenceCounter<Target<F>>,
    accumulated: ReferenceCounter<[A]>,
}

impl<A, F> Curried<A, F> {
    /// Creates the root link of a chain with no accumulated arguments.
    ///
    /// Prefer the [`curry`](super::curry) function, which also pins the
    /// function's signature.
    #[inline]
    pub fn new<R>(arity: usize, function: F) -> Self
    where
        F: Fn(Vec<A>) -> R,
    {
        Self {
            target: ReferenceCounter::new(Target { function, arity }),
            accumulated: ReferenceCounter::from(Vec::new()),
        }
    }

    /// Returns the number of arguments the target needs.
    #[inline]
    pub fn arity(&self) -> usize {
        self.target.arity
    }

    /// Returns the arguments accumulated by this link, oldest first.
    #[inline]
    pub fn accumulated(&self) -> &[A] {
        &self.accumulated
    }

    /// Returns how many more arguments complete the chain.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.target.arity.saturating_sub(self.accumulated.len())
    }

    /// Returns `true` if both handles refer to the same link.
    ///
    /// An empty [`apply`](Self::apply) hands back a handle for which this
    /// holds; every non-empty partial application yields a distinct link.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.target, &other.target)
            && ReferenceCounter::ptr_eq(&self.accumulated, &other.accumulated)
    }
}

impl<A: Clone, F> Curried<A, F> {
    /// Applies `arguments` after the ones this link already holds.
    ///
    /// Let `total` be the accumulated arguments followed by `arguments`.
    /// If `total` reaches the arity, the target runs with all of `total`
    /// (including any excess) and its result is returned as
    /// [`Application::Complete`]. Otherwise a new link holding `total` is
    /// returned as [`Application::Partial`].
    ///
    /// Applying no arguments to a link that still needs some returns the
    /// same link again. A link whose arity is already met (only possible
    /// for an arity-0 root) runs the target on an empty application.
    ///
    /// The target's failures (an `Err` output or a panic) reach the caller
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curry_memo::curry;
    ///
    /// let count = curry(2, |arguments: Vec<u8>| arguments.len());
    ///
    /// let same = count.apply([]).into_partial().unwrap();
    /// assert!(same.ptr_eq(&count));
    ///
    /// // Excess arguments are all passed through.
    /// assert_eq!(count.apply([1, 2, 3]).into_complete(), Some(3));
    ///
    /// let nullary = curry(0, |arguments: Vec<u8>| arguments.len());
    /// assert_eq!(nullary.apply([]).into_complete(), Some(0));
    /// ```
    pub fn apply<R, I>(&self, arguments: I) -> Application<Self, R>
    where
        F: Fn(Vec<A>) -> R,
        I: IntoIterator<Item = A>,
    {
        let arguments: Vec<A> = arguments.into_iter().collect();
        let arity = self.target.arity;

        if arguments.is_empty() && self.accumulated.len() < arity {
            return Application::Partial(self.clone());
        }

        let mut total = Vec::with_capacity(self.accumulated.len() + arguments.len());
        total.extend_from_slice(&self.accumulated);
        total.extend(arguments);

        if total.len() >= arity {
            trace!(
                target: "curry_memo::curry",
                arity,
                supplied = total.len(),
                "invoking curried target"
            );
            Application::Complete((self.target.function)(total))
        } else {
            trace!(
                target: "curry_memo::curry",
                arity,
                supplied = total.len(),
                "extending curry chain"
            );
            Application::Partial(Self {
                target: ReferenceCounter::clone(&self.target),
                accumulated: ReferenceCounter::from(total),
            })
        }
    }

    /// Applies a single argument. Shorthand for `apply([argument])`.
    #[inline]
    pub fn apply_one<R>(&self, argument: A) -> Application<Self, R>
    where
        F: Fn(Vec<A>) -> R,
    {
        self.apply(std::iter::once(argument))
    }
}

impl<A, F> Clone for Curried<A, F> {
    fn clone(&self) -> Self {
        Self {
            target: ReferenceCounter::clone(&self.target),
            accumulated: ReferenceCounter::clone(&self.accumulated),
        }
    }
}

impl<A: fmt::Debug, F> fmt::Debug for Curried<A, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Curried")
            .field("arity", &self.target.arity)
            .field("accumulated", &&*self.accumulated)
            .finish_non_exhaustive()
    }
}
