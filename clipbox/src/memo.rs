//! Keyed lazy cache for derived values
//!
//! A derived value is recomputed the first time it is read after any of its
//! inputs changed. Inputs are summarised by a key, usually a tuple of revision
//! counters, so readers never observe a value computed from stale inputs and
//! repeated reads with unchanged inputs cost a key comparison.

/// Lazily computed value tagged with the key of the inputs it was built from
#[derive(Debug, Clone)]
pub struct Memo<K, T> {
    cached: Option<(K, T)>,
    recomputations: usize,
}

impl<K: PartialEq + Copy, T> Memo<K, T> {
    /// An empty cache
    pub const fn new() -> Self {
        Self {
            cached: None,
            recomputations: 0,
        }
    }

    /// Return the cached value for `key`, computing it if the key changed
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> T) -> &T {
        let fresh = self.is_fresh(key);
        let entry = match self.cached.take() {
            Some(entry) if fresh => entry,
            _ => {
                self.recomputations += 1;
                (key, compute())
            }
        };
        let (_, value) = self.cached.insert(entry);
        value
    }

    /// Drop the cached value
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Whether a value is cached for `key`
    pub fn is_fresh(&self, key: K) -> bool {
        matches!(&self.cached, Some((cached_key, _)) if *cached_key == key)
    }

    /// Number of times the value has been computed
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

impl<K: PartialEq + Copy, T> Default for Memo<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
