//! Single-threaded memoizing wrappers.

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use super::cache::MemoCache;
use super::{KeyPolicy, MemoizeError, Structural};

/// A function wrapped with an insert-only result cache.
///
/// Every call derives a key from its arguments through the policy `P`. The
/// wrapped function runs only on the first call for each key; later calls
/// return a clone of the stored result. Entries are never replaced or
/// removed while the wrapper lives.
///
/// Functions of several arguments take them as one tuple.
///
/// # Type Parameters
///
/// * `Args` - The argument list, usually a tuple
/// * `R` - The result type, cloned out of the cache
/// * `F` - The wrapped function, `Fn(Args) -> R`
/// * `P` - The [`KeyPolicy`], [`Structural`] by default
///
/// # Examples
///
/// ```rust
/// use curry_memo::memoize;
/// use std::cell::Cell;
///
/// let computed = Cell::new(0);
/// let sum = memoize(|(first, second): (i32, i32)| {
///     computed.set(computed.get() + 1);
///     first + second
/// });
///
/// assert_eq!(sum.call((1, 2)), 3);
/// assert_eq!(sum.call((1, 2)), 3);
/// assert_eq!(sum.call((2, 1)), 3);
/// assert_eq!(computed.get(), 2);
/// assert_eq!(sum.len(), 2);
/// ```
pub struct Memoized<Args, R, F, P = Structural>
where
    P: KeyPolicy<Args>,
{
    function: F,
    policy: P,
    cache: MemoCache<P::Key, R>,
    _arguments: PhantomData<fn(Args)>,
}

impl<Args, R, F> Memoized<Args, R, F, Structural>
where
    Args: Clone + std::hash::Hash + Eq,
    R: Clone,
    F: Fn(Args) -> R,
{
    /// Wraps `function`, keying the cache by the arguments themselves.
    pub fn new(function: F) -> Self {
        Self::with_policy(function, Structural)
    }

    /// Like [`new`](Self::new), with room for `capacity` entries up front.
    pub fn with_capacity(function: F, capacity: usize) -> Self {
        Self::with_policy_and_capacity(function, Structural, capacity)
    }
}

impl<Args, R, F, P> Memoized<Args, R, F, P>
where
    R: Clone,
    F: Fn(Args) -> R,
    P: KeyPolicy<Args>,
{
    /// Wraps `function`, keying the cache with `policy`.
    pub fn with_policy(function: F, policy: P) -> Self {
        Self::with_policy_and_capacity(function, policy, 0)
    }

    /// Like [`with_policy`](Self::with_policy), with room for `capacity`
    /// entries up front.
    pub fn with_policy_and_capacity(function: F, policy: P, capacity: usize) -> Self {
        Self {
            function,
            policy,
            cache: MemoCache::with_capacity(capacity),
            _arguments: PhantomData,
        }
    }

    /// Returns the cached result for `arguments`, computing it on a miss.
    ///
    /// # Errors
    ///
    /// Returns the policy's error if no key can be derived. The function is
    /// not invoked in that case and nothing is cached.
    pub fn try_call(&self, arguments: Args) -> Result<R, P::Error> {
        let key = self.policy.derive_key(&arguments).inspect_err(|_| {
            debug!(target: "curry_memo::memoize", "key derivation failed");
        })?;
        self.cache
            .get_or_try_insert_with(key, || Ok((self.function)(arguments)))
    }

    /// Returns `true` if a result for `arguments` is cached.
    ///
    /// Arguments whose key cannot be derived are never cached.
    pub fn contains(&self, arguments: &Args) -> bool {
        self.policy
            .derive_key(arguments)
            .is_ok_and(|key| self.cache.contains_key(&key))
    }

    /// Returns the number of cached results.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.cache.len() == 0
    }

    /// Returns the key policy.
    pub const fn policy(&self) -> &P {
        &self.policy
    }
}

impl<Args, R, F, P> Memoized<Args, R, F, P>
where
    R: Clone,
    F: Fn(Args) -> R,
    P: KeyPolicy<Args, Error = Infallible>,
{
    /// Returns the cached result for `arguments`, computing it on a miss.
    ///
    /// Available when the key policy cannot fail.
    pub fn call(&self, arguments: Args) -> R {
        match self.try_call(arguments) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }
}

impl<Args, R, F, P> fmt::Debug for Memoized<Args, R, F, P>
where
    P: KeyPolicy<Args> + fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Memoized")
            .field("policy", &self.policy)
            .field("entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}

/// A fallible function wrapped with a cache of its successes.
///
/// Only `Ok` results are stored. An `Err` reaches the caller unchanged and
/// leaves no entry behind, so the next call with the same key runs the
/// function again.
///
/// # Examples
///
/// ```rust
/// use curry_memo::try_memoize;
/// use std::cell::Cell;
///
/// let attempts = Cell::new(0);
/// let parse = try_memoize(|text: String| {
///     attempts.set(attempts.get() + 1);
///     if attempts.get() == 1 {
///         Err("transient")
///     } else {
///         text.parse::<u32>().map_err(|_| "invalid")
///     }
/// });
///
/// assert_eq!(parse.call("7".to_string()), Err("transient"));
/// assert_eq!(parse.call("7".to_string()), Ok(7));
/// assert_eq!(parse.call("7".to_string()), Ok(7));
/// assert_eq!(attempts.get(), 2);
/// ```
pub struct TryMemoized<Args, T, E, F, P = Structural>
where
    P: KeyPolicy<Args>,
{
    function: F,
    policy: P,
    cache: MemoCache<P::Key, T>,
    _signature: PhantomData<fn(Args) -> E>,
}

impl<Args, T, E, F> TryMemoized<Args, T, E, F, Structural>
where
    Args: Clone + std::hash::Hash + Eq,
    T: Clone,
    F: Fn(Args) -> Result<T, E>,
{
    /// Wraps `function`, keying the cache by the arguments themselves.
    pub fn new(function: F) -> Self {
        Self::with_policy(function, Structural)
    }
}

impl<Args, T, E, F, P> TryMemoized<Args, T, E, F, P>
where
    T: Clone,
    F: Fn(Args) -> Result<T, E>,
    P: KeyPolicy<Args>,
{
    /// Wraps `function`, keying the cache with `policy`.
    pub fn with_policy(function: F, policy: P) -> Self {
        Self::with_policy_and_capacity(function, policy, 0)
    }

    /// Like [`with_policy`](Self::with_policy), with room for `capacity`
    /// entries up front.
    pub fn with_policy_and_capacity(function: F, policy: P, capacity: usize) -> Self {
        Self {
            function,
            policy,
            cache: MemoCache::with_capacity(capacity),
            _signature: PhantomData,
        }
    }

    /// Returns the cached success for `arguments`, computing it on a miss.
    ///
    /// # Errors
    ///
    /// - [`MemoizeError::KeyDerivation`] if the policy cannot derive a key
    /// - [`MemoizeError::Function`] if the function fails; nothing is cached
    pub fn try_call(&self, arguments: Args) -> Result<T, MemoizeError<P::Error, E>> {
        let key = self
            .policy
            .derive_key(&arguments)
            .map_err(MemoizeError::KeyDerivation)?;
        self.cache.get_or_try_insert_with(key, || {
            (self.function)(arguments).map_err(MemoizeError::Function)
        })
    }

    /// Returns `true` if a success for `arguments` is cached.
    pub fn contains(&self, arguments: &Args) -> bool {
        self.policy
            .derive_key(arguments)
            .is_ok_and(|key| self.cache.contains_key(&key))
    }

    /// Returns the number of cached successes.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.cache.len() == 0
    }
}

impl<Args, T, E, F, P> TryMemoized<Args, T, E, F, P>
where
    T: Clone,
    F: Fn(Args) -> Result<T, E>,
    P: KeyPolicy<Args, Error = Infallible>,
{
    /// Returns the cached success for `arguments`, computing it on a miss.
    ///
    /// # Errors
    ///
    /// Returns the function's own error verbatim; nothing is cached.
    pub fn call(&self, arguments: Args) -> Result<T, E> {
        self.try_call(arguments).map_err(|error| match error {
            MemoizeError::KeyDerivation(never) => match never {},
            MemoizeError::Function(error) => error,
        })
    }
}

impl<Args, T, E, F, P> fmt::Debug for TryMemoized<Args, T, E, F, P>
where
    P: KeyPolicy<Args> + fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TryMemoized")
            .field("policy", &self.policy)
            .field("entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}
