//! Procedural macros for curry-memo.
//!
//! # Available Function-like Macros
//!
//! - [`curry!`]: Builds a `curry_memo::curry::Curried` chain, reading the
//!   arity from a closure's parameter list
//!
//! # Example
//!
//! ```rust,ignore
//! use curry_memo::curry;
//!
//! // Arity 3, taken from the closure
//! let sum = curry!(|a: i32, b: i32, c: i32| a + b + c);
//! let one = sum.apply([1]).into_partial().unwrap();
//! assert_eq!(one.apply([2, 3]).into_complete(), Some(6));
//!
//! // Function path with an explicit arity
//! fn max(first: i32, second: i32) -> i32 { first.max(second) }
//! let larger = curry!(max, 2);
//! assert_eq!(larger.apply([4, 9]).into_complete(), Some(9));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod curry;

use proc_macro::TokenStream;

/// Curries a closure or function path into a `curry_memo` chain.
///
/// # Supported Forms
///
/// - `curry!(|a: T, b: T, ...| body)`: the arity is the parameter count
/// - `curry!(path::to::function, N)`: the arity is the integer literal `N`
///
/// Every parameter must have the same type `T`, because a chain accumulates
/// its arguments in one `Vec<T>`. The expansion hands the first `N`
/// accumulated arguments to the function positionally; excess arguments
/// supplied by the completing call are dropped.
///
/// # Generated Code
///
/// For `curry!(|a: i32, b: i32| a + b)` the macro generates:
///
/// ```rust,ignore
/// {
///     let __curry_memo_function = |a: i32, b: i32| a + b;
///     ::curry_memo::curry(2usize, move |__curry_memo_arguments: ::std::vec::Vec<_>| {
///         let mut __curry_memo_arguments = __curry_memo_arguments.into_iter();
///         match (__curry_memo_arguments.next(), __curry_memo_arguments.next(),) {
///             (Some(__curry_memo_argument_0), Some(__curry_memo_argument_1),) => {
///                 __curry_memo_function(__curry_memo_argument_0, __curry_memo_argument_1)
///             }
///             _ => unreachable!(/* ... */),
///         }
///     })
/// }
/// ```
///
/// # Errors
///
/// Compile errors are reported for closures without parameters, a missing
/// or non-literal arity, an arity of zero, and any other input shape.
#[proc_macro]
pub fn curry(input: TokenStream) -> TokenStream {
    curry::curry_impl(input.into()).into()
}
