//! Single-entry memoization keyed by declared inputs.
//!
//! A `DerivedDataCache` belongs to exactly one call-site. It recomputes only
//! when the key handed to `get_or_compute` differs from the key of the cached
//! value; unrelated state changes never reach it.

use std::fmt;
use std::sync::Arc;

/// Key that compares by `Arc` pointer identity instead of by value.
///
/// Use this when the input is a large shared sequence: two different
/// allocations with equal contents are still different inputs.
pub struct Identity<T: ?Sized>(Arc<T>);

impl<T: ?Sized> Identity<T> {
    pub fn of(value: &Arc<T>) -> Self {
        Self(Arc::clone(value))
    }

    pub fn get(&self) -> &Arc<T> {
        &self.0
    }
}

impl<T: ?Sized> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Identity<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Eq for Identity<T> {}

impl<T: ?Sized> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({:p})", Arc::as_ptr(&self.0))
    }
}

/// Caches one derived value together with the key it was computed from.
#[derive(Debug)]
pub struct DerivedDataCache<K, V> {
    entry: Option<(K, V)>,
    computations: u64,
}

impl<K, V> Default for DerivedDataCache<K, V> {
    fn default() -> Self {
        Self {
            entry: None,
            computations: 0,
        }
    }
}

impl<K: PartialEq, V> DerivedDataCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, running `compute` only when the
    /// cache is empty or was filled from a different key.
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> &V
    where
        F: FnOnce(&K) -> V,
    {
        let stale = self.entry.as_ref().is_none_or(|(cached, _)| *cached != key);
        if stale {
            let value = compute(&key);
            self.computations += 1;
            self.entry = Some((key, value));
        }
        match &self.entry {
            Some((_, value)) => value,
            None => unreachable!("entry populated above"),
        }
    }

    /// Last computed value, without touching the key.
    pub fn peek(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, v)| v)
    }

    /// Number of times `compute` has run.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_same_key_computes_once() {
        let calls = Cell::new(0);
        let mut cache = DerivedDataCache::new();
        for _ in 0..3 {
            let v = cache.get_or_compute(7, |k| {
                calls.set(calls.get() + 1);
                k * 2
            });
            assert_eq!(*v, 14);
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.computations(), 1);
    }

    #[test]
    fn test_changed_key_recomputes_exactly_once() {
        let mut cache = DerivedDataCache::new();
        cache.get_or_compute("a", |k| k.len());
        cache.get_or_compute("bb", |k| k.len());
        cache.get_or_compute("bb", |k| k.len());
        assert_eq!(cache.peek(), Some(&2));
        assert_eq!(cache.computations(), 2);
    }

    #[test]
    fn test_unit_key_is_computed_once_for_lifetime() {
        let mut cache: DerivedDataCache<(), Vec<u32>> = DerivedDataCache::new();
        let first = cache.get_or_compute((), |()| vec![1, 2, 3]).clone();
        let second = cache.get_or_compute((), |()| vec![9]).clone();
        assert_eq!(first, second);
        assert_eq!(cache.computations(), 1);
    }

    #[test]
    fn test_identity_key_ignores_equal_contents() {
        let a: Arc<[f64]> = Arc::from(vec![1.0, 2.0]);
        let b: Arc<[f64]> = Arc::from(vec![1.0, 2.0]);
        let mut cache = DerivedDataCache::new();

        cache.get_or_compute(Identity::of(&a), |k| k.get().len());
        cache.get_or_compute(Identity::of(&a), |k| k.get().len());
        assert_eq!(cache.computations(), 1);

        cache.get_or_compute(Identity::of(&b), |k| k.get().len());
        assert_eq!(cache.computations(), 2);
    }
}
