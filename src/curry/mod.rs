//! Argument-accumulating currying.
//!
//! [`curry`] wraps a function of a fixed arity into a [`Curried`] link.
//! Applying arguments to a link either produces a new link holding the
//! accumulated arguments, or, once the arity is met, invokes the function.
//!
//! # Overview
//!
//! ```text
//! curry(3, f).apply([1]).apply([2]).apply([3]) == f([1, 2, 3])
//! curry(3, f).apply([1, 2]).apply([3])         == f([1, 2, 3])
//! curry(3, f).apply([1, 2]).apply([3, 4])      == f([1, 2, 3, 4])
//! ```
//!
//! Links are immutable. Applying arguments to a link never changes it, so a
//! partially applied link can be reused to branch into independent chains:
//!
//! ```rust
//! use curry_memo::curry;
//!
//! let sum = curry(3, |arguments: Vec<i32>| arguments.iter().sum::<i32>());
//! let one = sum.apply([1]).into_partial().unwrap();
//!
//! let one_two = one.apply([2]).into_partial().unwrap();
//! let one_three = one.apply([3]).into_partial().unwrap();
//!
//! assert_eq!(one_two.apply([6]).into_complete(), Some(9));
//! assert_eq!(one_three.apply([4]).into_complete(), Some(8));
//! assert_eq!(one.accumulated(), &[1]);
//! ```
//!
//! # Excess Arguments
//!
//! When a call pushes the total past the arity, the function receives every
//! accumulated argument, not just the first `arity` of them.
//!
//! # Shared State
//!
//! The target function and the accumulated arguments are reference counted
//! (`Rc`, or `Arc` with the `arc` feature). Cloning a link is cheap and does
//! not require the argument type to be `Clone`.

mod application;
mod curried;

pub use application::Application;
pub use curried::Curried;

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which lets chains cross threads.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

/// Wraps `function` into the root link of a curry chain.
///
/// `arity` is the number of arguments that must be accumulated before
/// `function` runs. It is fixed for the whole chain. With `arity` 0 the
/// root is already complete: applying no arguments runs `function` with an
/// empty list.
///
/// # Examples
///
/// ```rust
/// use curry_memo::curry;
///
/// let sum = curry(3, |arguments: Vec<i32>| arguments.iter().sum::<i32>());
///
/// assert_eq!(sum.apply([1, 2, 3]).into_complete(), Some(6));
/// assert!(sum.apply([1, 2]).is_partial());
///
/// let nullary = curry(0, |arguments: Vec<i32>| arguments.is_empty());
/// assert_eq!(nullary.apply([]).into_complete(), Some(true));
/// ```
pub fn curry<A, R, F>(arity: usize, function: F) -> Curried<A, F>
where
    F: Fn(Vec<A>) -> R,
{
    Curried::new(arity, function)
}
