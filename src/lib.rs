//! # curry-memo
//!
//! Two higher-order wrappers over ordinary Rust functions:
//!
//! - **Curry Engine**: [`curry`] turns a function of a fixed arity into a
//!   chain of immutable links that accumulate arguments across calls and
//!   invoke the function once enough arguments have been supplied.
//! - **Memoizer**: [`memoize`] wraps a function with a cache keyed by its
//!   argument list, so repeated calls with equal arguments reuse the result.
//!
//! The two are independent and compose freely: a completed curry chain can
//! call into a memoized function, and a memoized function can return links.
//!
//! ## Feature Flags
//!
//! - `curry`: the Curry Engine
//! - `memoize`: the Memoizer
//! - `derive`: the [`curry!`] macro (reads arity from a closure)
//! - `concurrent`: [`memoize::ConcurrentMemoized`], a `Send + Sync` memoizer
//! - `serde`: [`memoize::Canonical`], serde-based order-insensitive cache keys
//! - `arc`: curry chains share state through `Arc` instead of `Rc`
//! - `fxhash` / `ahash`: faster hashers for memo caches
//! - `full`: Enable all features except the hasher overrides
//!
//! ## Examples
//!
//! Each example needs the feature it names.
#![cfg_attr(
    feature = "curry",
    doc = r#"
With `curry`:

```rust
use curry_memo::curry;

let sum = curry(3, |arguments: Vec<i32>| arguments.iter().sum::<i32>());
let increment = sum.apply([1]).into_partial().unwrap();
assert_eq!(increment.apply([2, 3]).into_complete(), Some(6));
assert_eq!(increment.apply([4, 5]).into_complete(), Some(10));
```
"#
)]
#![cfg_attr(
    feature = "memoize",
    doc = r#"
With `memoize`:

```rust
use curry_memo::memoize;
use std::cell::Cell;

let computed = Cell::new(0);
let square = memoize(|value: u64| {
    computed.set(computed.get() + 1);
    value * value
});
assert_eq!(square.call(12), 144);
assert_eq!(square.call(12), 144);
assert_eq!(computed.get(), 1);
```
"#
)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use curry_memo::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "curry")]
    pub use crate::curry::*;

    #[cfg(feature = "memoize")]
    pub use crate::memoize::*;
}

#[cfg(feature = "curry")]
pub mod curry;

#[cfg(feature = "memoize")]
pub mod memoize;

#[cfg(feature = "curry")]
pub use crate::curry::curry;

#[cfg(feature = "memoize")]
pub use crate::memoize::{memoize, try_memoize};

/// Curries a closure or a function path into a [`curry::Curried`] chain.
///
/// The arity is the closure's parameter count, or the integer literal given
/// after a function path. All parameters must share one type.
///
/// ```rust
/// use curry_memo::curry;
///
/// let volume = curry!(|width: u32, height: u32, depth: u32| width * height * depth);
/// let base = volume.apply([2, 3]).into_partial().unwrap();
/// assert_eq!(base.apply_one(4).into_complete(), Some(24));
///
/// fn clamp(low: i64, high: i64, value: i64) -> i64 {
///     value.max(low).min(high)
/// }
/// let percent = curry!(clamp, 3).apply([0, 100]).into_partial().unwrap();
/// assert_eq!(percent.apply_one(140).into_complete(), Some(100));
/// ```
#[cfg(feature = "derive")]
pub use curry_memo_derive::curry;
