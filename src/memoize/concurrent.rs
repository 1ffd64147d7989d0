//! Thread-safe memoization with a build-once guarantee per key.
//!
//! [`ConcurrentMemoized`] can be shared between threads (for example behind
//! an `Arc`). The first caller for a key computes the value while later
//! callers for the same key wait for it; callers for other keys proceed in
//! parallel.
//!
//! # Re-entry Warning
//!
//! Calling the wrapper from inside its own function with the key currently
//! being computed deadlocks, since that key's slot is held by the caller.
//! Re-entrant calls for other keys are fine.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::{CacheHasher, KeyPolicy, Structural};

/// One key's value, locked for the duration of its first computation.
type Slot<R> = Arc<Mutex<Option<R>>>;

/// A thread-safe function wrapper with an insert-only result cache.
///
/// Behaves like [`Memoized`](super::Memoized), and additionally guarantees
/// that concurrent first calls for one key invoke the function exactly once.
/// A panic inside the function leaves the key uncomputed; the next caller
/// retries. If no other caller is waiting on that key, its slot is dropped
/// from the map as the panic unwinds.
///
/// This type is `Send + Sync` when `F: Send + Sync`, `R: Send` and the
/// policy and its keys are `Send + Sync`.
///
/// # Examples
///
/// ```rust
/// use curry_memo::memoize::ConcurrentMemoized;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::thread;
///
/// let computed = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&computed);
/// let square = Arc::new(ConcurrentMemoized::new(move |value: u64| {
///     counter.fetch_add(1, Ordering::SeqCst);
///     value * value
/// }));
///
/// let handles: Vec<_> = (0..8)
///     .map(|_| {
///         let square = Arc::clone(&square);
///         thread::spawn(move || square.call(9))
///     })
///     .collect();
///
/// for handle in handles {
///     assert_eq!(handle.join().unwrap(), 81);
/// }
/// assert_eq!(computed.load(Ordering::SeqCst), 1);
/// ```
pub struct ConcurrentMemoized<Args, R, F, P = Structural>
where
    P: KeyPolicy<Args>,
{
    function: F,
    policy: P,
    slots: Mutex<HashMap<P::Key, Slot<R>, CacheHasher>>,
    stored: AtomicUsize,
    _arguments: PhantomData<fn(Args)>,
}

impl<Args, R, F> ConcurrentMemoized<Args, R, F, Structural>
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

impl<Args, R, F, P> ConcurrentMemoized<Args, R, F, P>
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
            slots: Mutex::new(HashMap::with_capacity_and_hasher(
                capacity,
                CacheHasher::default(),
            )),
            stored: AtomicUsize::new(0),
            _arguments: PhantomData,
        }
    }

    /// Returns the cached result for `arguments`, computing it on a miss.
    ///
    /// Blocks while another thread computes the same key.
    ///
    /// # Errors
    ///
    /// Returns the policy's error if no key can be derived. The function is
    /// not invoked in that case and nothing is cached.
    pub fn try_call(&self, arguments: Args) -> Result<R, P::Error> {
        let key = self.policy.derive_key(&arguments).inspect_err(|_| {
            debug!(target: "curry_memo::memoize", "key derivation failed");
        })?;

        let slot = Arc::clone(self.slots.lock().entry(key).or_default());
        let mut value = slot.lock();

        if let Some(cached) = value.as_ref() {
            trace!(target: "curry_memo::memoize", "cache hit");
            return Ok(cached.clone());
        }

        trace!(target: "curry_memo::memoize", "cache miss");
        let mut vacancy = Vacancy {
            slots: &self.slots,
            slot: &slot,
            armed: true,
        };
        let computed = (self.function)(arguments);
        vacancy.armed = false;
        *value = Some(computed.clone());
        let entries = self.stored.fetch_add(1, Ordering::AcqRel) + 1;
        trace!(target: "curry_memo::memoize", entries, "cache store");
        Ok(computed)
    }

    /// Returns `true` if a result for `arguments` is cached.
    ///
    /// Blocks while another thread computes the same key.
    pub fn contains(&self, arguments: &Args) -> bool {
        let Ok(key) = self.policy.derive_key(arguments) else {
            return false;
        };
        let slot = self.slots.lock().get(&key).map(Arc::clone);
        slot.is_some_and(|slot| slot.lock().is_some())
    }

    /// Returns the number of cached results.
    pub fn len(&self) -> usize {
        self.stored.load(Ordering::Acquire)
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the key policy.
    pub const fn policy(&self) -> &P {
        &self.policy
    }
}

impl<Args, R, F, P> ConcurrentMemoized<Args, R, F, P>
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

/// Removes a slot left empty by a panicking computation.
///
/// The slot is removed only while the map holds the sole other handle.
/// Handles are cloned under the map lock, so a count of two seen under
/// that lock means no caller is waiting on the slot.
struct Vacancy<'a, K, R> {
    slots: &'a Mutex<HashMap<K, Slot<R>, CacheHasher>>,
    slot: &'a Slot<R>,
    armed: bool,
}

impl<K, R> Drop for Vacancy<'_, K, R> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut slots = self.slots.lock();
        if Arc::strong_count(self.slot) == 2 {
            slots.retain(|_, candidate| !Arc::ptr_eq(candidate, self.slot));
            debug!(target: "curry_memo::memoize", "discarded slot after panic");
        }
    }
}

impl<Args, R, F, P> fmt::Debug for ConcurrentMemoized<Args, R, F, P>
where
    P: KeyPolicy<Args> + fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ConcurrentMemoized")
            .field("policy", &self.policy)
            .field("entries", &self.stored.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::thread;

    #[rstest]
    fn distinct_keys_are_stored_separately() {
        let subtract = ConcurrentMemoized::new(|(left, right): (i32, i32)| left - right);

        assert_eq!(subtract.call((5, 3)), 2);
        assert_eq!(subtract.call((3, 5)), -2);
        assert_eq!(subtract.len(), 2);
        assert!(subtract.contains(&(5, 3)));
        assert!(!subtract.contains(&(0, 0)));
    }

    #[rstest]
    fn panic_leaves_slot_empty() {
        let calls = AtomicUsize::new(0);
        let fragile = ConcurrentMemoized::new(|value: i32| {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            assert!(attempt > 0, "first call fails");
            value
        });

        let first = catch_unwind(AssertUnwindSafe(|| fragile.call(4)));
        assert!(first.is_err());
        assert!(!fragile.contains(&4));
        assert!(fragile.is_empty());

        assert_eq!(fragile.call(4), 4);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[rstest]
    fn panic_discards_unshared_slot() {
        let always_fails = ConcurrentMemoized::new(|value: i32| -> i32 {
            panic!("cannot compute {value}");
        });

        for value in 0..4 {
            let outcome = catch_unwind(AssertUnwindSafe(|| always_fails.call(value)));
            assert!(outcome.is_err());
        }

        assert!(always_fails.slots.lock().is_empty());
        assert!(always_fails.is_empty());
    }

    #[rstest]
    fn lookup_does_not_create_slots() {
        let double = ConcurrentMemoized::new(|value: u8| u16::from(value) * 2);

        assert!(!double.contains(&3));
        assert!(double.slots.lock().is_empty());

        assert_eq!(double.call(3), 6);
        assert_eq!(double.slots.lock().len(), 1);
    }

    #[rstest]
    fn concurrent_first_access_computes_once() {
        let calls = AtomicUsize::new(0);
        let slow = ConcurrentMemoized::new(|value: u32| {
            calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(20));
            value + 1
        });

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| assert_eq!(slow.call(1), 2));
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(slow.len(), 1);
    }
}
