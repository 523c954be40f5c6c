//! Keyed store that deduplicates values by a derived key.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                       KeyedStore<K, V> Layout                            │
//! │                                                                          │
//! │   select_key: Fn(&V) -> K           (fixed at construction)              │
//! │                                                                          │
//! │   entries: RwLock<IndexMap<K, Arc<V>>>                                   │
//! │   ┌──────────┬─────────────┐                                             │
//! │   │   Key    │   Arc<V>    │   iteration = first-insertion order         │
//! │   ├──────────┼─────────────┤                                             │
//! │   │    1     │  {id: 1,..} │                                             │
//! │   │    2     │  {id: 2,..} │                                             │
//! │   └──────────┴─────────────┘                                             │
//! │                                                                          │
//! │   added / updated / removed: Observers<Added|Updated|Removed<Arc<V>>>    │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//!
//! | Operation  | Atomic per key | Notes                                          |
//! |------------|----------------|------------------------------------------------|
//! | `upsert`   | yes            | insert-or-replace decided under one write lock |
//! | `set`      | **no**         | existence check and write are separate steps   |
//! | `remove`   | yes            | `Removed` fires iff this call removed it; O(n) |
//! | `clear`    | yes            | one `Removed` per drained entry                |
//!
//! `set` keeps the check-then-assign race on purpose: two threads setting the
//! same absent key can both report `Added`. The stored value is the last
//! write; only the notification count is inflated. Use `upsert` when exactly
//! one `Added` per key matters.
//!
//! ## Ordering
//!
//! `keys()` and `values()` return entries in the order their keys were first
//! inserted. Replacing a value keeps its position; removing a key and
//! inserting it again moves it to the end.
//!
//! Keeping that order makes `remove` O(n): the entries after the removed one
//! are shifted while the write lock is held, so every reader and writer waits
//! for the shift on a large store.
//!
//! Observers are called after the write lock is released, so they may read
//! or mutate the store.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use observekit::store::keyed::KeyedStore;
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     id: u32,
//!     name: &'static str,
//! }
//!
//! let store = KeyedStore::new(|u: &User| u.id);
//! let updates = Arc::new(AtomicUsize::new(0));
//!
//! let counter = Arc::clone(&updates);
//! store.on_updated(move |_| {
//!     counter.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! store.upsert(User { id: 1, name: "created" });
//! store.upsert(User { id: 1, name: "renamed" });
//!
//! assert_eq!(store.len(), 1);
//! assert_eq!(store.get(&1).unwrap().name, "renamed");
//! assert_eq!(updates.load(Ordering::Relaxed), 1);
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::error::{ConfigError, NotFoundError};
use crate::event::{Added, Observers, Removed, SubscriptionId, Updated};
#[cfg(feature = "metrics")]
use crate::metrics::counters::StoreCounters;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::StoreMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::traits::ConcurrentContainer;

/// Derives the key of a stored value.
pub type KeySelector<K, V> = Box<dyn Fn(&V) -> K + Send + Sync>;

/// Thread-safe map of values deduplicated by `select_key(value)`.
pub struct KeyedStore<K, V> {
    entries: RwLock<IndexMap<K, Arc<V>, FxBuildHasher>>,
    select_key: KeySelector<K, V>,
    added: Observers<Added<Arc<V>>>,
    updated: Observers<Updated<Arc<V>>>,
    removed: Observers<Removed<Arc<V>>>,
    #[cfg(feature = "metrics")]
    metrics: StoreCounters,
}

impl<K, V> KeyedStore<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty store keyed by `select_key`.
    ///
    /// The selector must be pure, and the key it derives must not change
    /// while the value is stored.
    pub fn new<F>(select_key: F) -> Self
    where
        F: Fn(&V) -> K + Send + Sync + 'static,
    {
        Self::from_parts(Box::new(select_key), 0)
    }

    /// Creates an empty store with room for `capacity` entries.
    pub fn with_capacity<F>(capacity: usize, select_key: F) -> Self
    where
        F: Fn(&V) -> K + Send + Sync + 'static,
    {
        Self::from_parts(Box::new(select_key), capacity)
    }

    /// Returns a builder, for callers that supply the key selector late.
    pub fn builder() -> KeyedStoreBuilder<K, V> {
        KeyedStoreBuilder::new()
    }

    fn from_parts(select_key: KeySelector<K, V>, capacity: usize) -> Self {
        Self {
            entries: RwLock::new(IndexMap::with_capacity_and_hasher(
                capacity,
                FxBuildHasher,
            )),
            select_key,
            added: Observers::new(),
            updated: Observers::new(),
            removed: Observers::new(),
            #[cfg(feature = "metrics")]
            metrics: StoreCounters::default(),
        }
    }

    /// Key this store derives for `value`.
    #[inline]
    pub fn key_of(&self, value: &V) -> K {
        (self.select_key)(value)
    }

    /// Inserts `value` under its derived key, or replaces the current entry.
    ///
    /// Fires exactly one of `Added` (key was absent) or `Updated` (key was
    /// present). Concurrent upserts of the same key never both see it absent.
    pub fn upsert(&self, value: V) {
        let key = self.key_of(&value);
        let value = Arc::new(value);

        let replaced = self.entries.write().insert(key, Arc::clone(&value));
        self.notify_write(value, replaced.is_some());
    }

    /// Upserts each value in order. Readers may observe a partial batch.
    pub fn upsert_many<I>(&self, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        for value in values {
            self.upsert(value);
        }
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if the key has no entry. Use
    /// [`find`](Self::find) when absence is an expected outcome.
    pub fn get(&self, key: &K) -> Result<Arc<V>, NotFoundError> {
        self.find(key)
            .ok_or_else(|| NotFoundError::new("no entry exists for the requested key"))
    }

    /// Assigns `value` to `key` (indexed assignment).
    ///
    /// Checks for the key and then writes, as two separate steps. `Added`
    /// fires if the check saw no entry, `Updated` otherwise. Two threads
    /// setting the same absent key may therefore both fire `Added`; the map
    /// still ends with a single entry holding the last write.
    ///
    /// The entry is stored under `key` as given, in every build. The key
    /// selector is not consulted, so a `key` that differs from
    /// `key_of(&value)` leaves the value reachable only through `key`.
    pub fn set(&self, key: K, value: V) {
        let existed = self.exists(&key);
        let value = Arc::new(value);
        self.entries.write().insert(key, Arc::clone(&value));
        self.notify_write(value, existed);
    }

    /// Whether `key` has an entry.
    #[inline]
    pub fn exists(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Returns the value stored under `key`, if any.
    pub fn find(&self, key: &K) -> Option<Arc<V>> {
        let found = self.entries.read().get(key).cloned();

        #[cfg(feature = "metrics")]
        self.metrics.record_lookup(found.is_some());

        found
    }

    /// Removes the entry for `key`.
    ///
    /// Returns `true` and fires `Removed` exactly once if an entry was
    /// removed; returns `false` silently otherwise.
    pub fn remove(&self, key: &K) -> bool {
        // shift_remove keeps the remaining keys in insertion order.
        let removed = self.entries.write().shift_remove(key);

        match removed {
            Some(value) => {
                tracing::trace!("keyed store entry removed");

                #[cfg(feature = "metrics")]
                self.metrics.add_removes(1);

                self.removed.notify(&Removed::new(value));
                true
            },
            None => false,
        }
    }

    /// Removes every entry, firing `Removed` once per entry that was present
    /// when the map was drained.
    ///
    /// Entries upserted by other threads after the drain survive.
    pub fn clear(&self) {
        let drained: Vec<Arc<V>> = {
            let mut entries = self.entries.write();
            entries.drain(..).map(|(_, value)| value).collect()
        };

        tracing::debug!(removed = drained.len(), "keyed store cleared");

        #[cfg(feature = "metrics")]
        {
            self.metrics.inc_clear();
            self.metrics.add_removes(drained.len() as u64);
        }

        for value in drained {
            self.removed.notify(&Removed::new(value));
        }
    }

    /// Snapshot of the stored values, in key insertion order.
    pub fn values(&self) -> Vec<Arc<V>> {
        self.entries.read().values().cloned().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn on_added<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Added<Arc<V>>) + Send + Sync + 'static,
    {
        self.added.subscribe(callback)
    }

    pub fn unsubscribe_added(&self, id: SubscriptionId) -> bool {
        self.added.unsubscribe(id)
    }

    pub fn on_updated<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Updated<Arc<V>>) + Send + Sync + 'static,
    {
        self.updated.subscribe(callback)
    }

    pub fn unsubscribe_updated(&self, id: SubscriptionId) -> bool {
        self.updated.unsubscribe(id)
    }

    pub fn on_removed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Removed<Arc<V>>) + Send + Sync + 'static,
    {
        self.removed.subscribe(callback)
    }

    pub fn unsubscribe_removed(&self, id: SubscriptionId) -> bool {
        self.removed.unsubscribe(id)
    }

    fn notify_write(&self, value: Arc<V>, replaced: bool) {
        if replaced {
            tracing::trace!("keyed store entry updated");

            #[cfg(feature = "metrics")]
            self.metrics.inc_update();

            self.updated.notify(&Updated::new(value));
        } else {
            tracing::trace!("keyed store entry added");

            #[cfg(feature = "metrics")]
            self.metrics.inc_insert();

            self.added.notify(&Added::new(value));
        }
    }
}

impl<K, V> KeyedStore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Snapshot of the keys, in insertion order.
    pub fn keys(&self) -> Vec<K> {
        self.entries.read().keys().cloned().collect()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> KeyedStore<K, V>
where
    K: Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> StoreMetricsSnapshot {
        self.metrics.snapshot(self.len())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<StoreMetricsSnapshot> for KeyedStore<K, V>
where
    K: Eq + Hash,
{
    fn snapshot(&self) -> StoreMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for KeyedStore<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedStore")
            .field("len", &self.len())
            .field("added_observers", &self.added.len())
            .field("updated_observers", &self.updated.len())
            .field("removed_observers", &self.removed.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> ConcurrentContainer for KeyedStore<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`KeyedStore`].
///
/// # Example
///
/// ```
/// use observekit::store::keyed::KeyedStore;
///
/// let store = KeyedStore::<u32, (u32, &str)>::builder()
///     .key_selector(|entry| entry.0)
///     .with_capacity(64)
///     .try_build();
/// assert!(store.is_ok());
///
/// let missing = KeyedStore::<u32, (u32, &str)>::builder().try_build();
/// assert!(missing.is_err());
/// ```
pub struct KeyedStoreBuilder<K, V> {
    select_key: Option<KeySelector<K, V>>,
    capacity: usize,
}

impl<K, V> KeyedStoreBuilder<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            select_key: None,
            capacity: 0,
        }
    }

    /// Sets the function deriving each value's key. Required.
    pub fn key_selector<F>(mut self, select_key: F) -> Self
    where
        F: Fn(&V) -> K + Send + Sync + 'static,
    {
        self.select_key = Some(Box::new(select_key));
        self
    }

    /// Pre-sizes the backing map.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds the store.
    ///
    /// # Panics
    ///
    /// Panics if no key selector was set. For a non-panicking alternative,
    /// use [`try_build`](Self::try_build).
    pub fn build(self) -> KeyedStore<K, V> {
        match self.try_build() {
            Ok(store) => store,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the store, returning an error if no key selector was set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when [`key_selector`](Self::key_selector) was
    /// never called.
    pub fn try_build(self) -> Result<KeyedStore<K, V>, ConfigError> {
        let select_key = self
            .select_key
            .ok_or_else(|| ConfigError::new("key selector must be provided"))?;
        Ok(KeyedStore::from_parts(select_key, self.capacity))
    }
}

impl<K, V> Default for KeyedStoreBuilder<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for KeyedStoreBuilder<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedStoreBuilder")
            .field("has_key_selector", &self.select_key.is_some())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Entity {
        id: u32,
        property: String,
    }

    fn entity(id: u32, property: &str) -> Entity {
        Entity {
            id,
            property: property.to_string(),
        }
    }

    fn store() -> KeyedStore<u32, Entity> {
        KeyedStore::new(|e: &Entity| e.id)
    }

    #[derive(Default)]
    struct Tally {
        added: AtomicUsize,
        updated: AtomicUsize,
        removed: AtomicUsize,
    }

    fn tally(store: &KeyedStore<u32, Entity>) -> Arc<Tally> {
        let tally = Arc::new(Tally::default());
        let t = Arc::clone(&tally);
        store.on_added(move |_| {
            t.added.fetch_add(1, Ordering::SeqCst);
        });
        let t = Arc::clone(&tally);
        store.on_updated(move |_| {
            t.updated.fetch_add(1, Ordering::SeqCst);
        });
        let t = Arc::clone(&tally);
        store.on_removed(move |_| {
            t.removed.fetch_add(1, Ordering::SeqCst);
        });
        tally
    }

    // ==============================================
    // Upsert
    // ==============================================

    mod upsert {
        use super::*;

        #[test]
        fn upsert_existing_replaces_and_fires_updated() {
            let store = store();
            let tally = tally(&store);

            store.upsert(entity(1, "Created"));
            store.upsert(entity(1, "Updated"));

            assert_eq!(tally.added.load(Ordering::SeqCst), 1);
            assert_eq!(tally.updated.load(Ordering::SeqCst), 1);
            assert_eq!(store.len(), 1);
            assert_eq!(store.get(&1).unwrap().property, "Updated");
        }

        #[test]
        fn two_keys_make_two_entries() {
            let store = store();
            store.upsert(entity(1, "One"));
            store.upsert(entity(2, "Two"));

            assert_eq!(store.len(), 2);
        }

        #[test]
        fn same_value_n_times_is_one_add_and_n_minus_one_updates() {
            let store = store();
            let tally = tally(&store);

            let value = entity(9, "same");
            for _ in 0..10 {
                store.upsert(value.clone());
            }

            assert_eq!(store.len(), 1);
            assert_eq!(tally.added.load(Ordering::SeqCst), 1);
            assert_eq!(tally.updated.load(Ordering::SeqCst), 9);
        }

        #[test]
        fn events_carry_the_new_value() {
            let store = store();
            let seen = Arc::new(Mutex::new(Vec::new()));

            let sink = Arc::clone(&seen);
            store.on_added(move |e| {
                sink.lock().unwrap().push(format!("+{}", e.item.property));
            });
            let sink = Arc::clone(&seen);
            store.on_updated(move |e| {
                sink.lock().unwrap().push(format!("~{}", e.item.property));
            });

            store.upsert(entity(1, "a"));
            store.upsert(entity(1, "b"));

            assert_eq!(*seen.lock().unwrap(), vec!["+a", "~b"]);
        }

        #[test]
        fn upsert_many_applies_in_order() {
            let store = store();
            let tally = tally(&store);

            store.upsert_many(vec![entity(1, "x"), entity(2, "y"), entity(1, "z")]);

            assert_eq!(store.len(), 2);
            assert_eq!(store.get(&1).unwrap().property, "z");
            assert_eq!(tally.added.load(Ordering::SeqCst), 2);
            assert_eq!(tally.updated.load(Ordering::SeqCst), 1);
        }
    }

    // ==============================================
    // Indexed access
    // ==============================================

    mod indexed {
        use super::*;

        #[test]
        fn get_missing_is_not_found() {
            let store = store();
            let err = store.get(&42).unwrap_err();
            assert!(err.message().contains("no entry"));
        }

        #[test]
        fn set_absent_key_fires_added() {
            let store = store();
            let tally = tally(&store);

            let value = entity(1, "One");
            store.set(1, value.clone());

            assert_eq!(tally.added.load(Ordering::SeqCst), 1);
            assert_eq!(tally.updated.load(Ordering::SeqCst), 0);
            assert_eq!(store.len(), 1);
            assert_eq!(*store.get(&1).unwrap(), value);
        }

        #[test]
        fn set_present_key_fires_updated() {
            let store = store();
            let tally = tally(&store);

            let value = entity(1, "One");
            store.set(1, value.clone());
            store.set(1, value.clone());

            assert_eq!(tally.added.load(Ordering::SeqCst), 1);
            assert_eq!(tally.updated.load(Ordering::SeqCst), 1);
            assert_eq!(store.len(), 1);
        }

        #[test]
        fn set_stores_under_the_given_key() {
            let store = store();
            let tally = tally(&store);

            store.set(5, entity(1, "Elsewhere"));

            assert!(store.exists(&5));
            assert!(!store.exists(&1));
            assert_eq!(store.get(&5).unwrap().id, 1);
            assert_eq!(tally.added.load(Ordering::SeqCst), 1);

            // The derived key is a separate entry.
            store.upsert(entity(1, "Derived"));
            assert_eq!(store.len(), 2);
            assert_eq!(store.keys(), vec![5, 1]);
        }

        #[test]
        fn find_and_exists_have_no_side_effects() {
            let store = store();
            let tally = tally(&store);
            store.upsert(entity(1, "Created"));

            let found = store.find(&1).unwrap();
            assert_eq!(found.id, 1);
            assert_eq!(found.property, "Created");
            assert!(store.exists(&1));
            assert!(!store.exists(&2));
            assert!(store.find(&2).is_none());

            assert_eq!(tally.added.load(Ordering::SeqCst), 1);
            assert_eq!(tally.updated.load(Ordering::SeqCst), 0);
        }
    }

    // ==============================================
    // Removal
    // ==============================================

    mod removal {
        use super::*;

        #[test]
        fn remove_existing_fires_removed() {
            let store = store();
            store.upsert(entity(1, "Created"));
            let tally = tally(&store);

            assert!(store.remove(&1));
            assert_eq!(tally.removed.load(Ordering::SeqCst), 1);
            assert!(store.is_empty());
        }

        #[test]
        fn remove_absent_is_silent() {
            let store = store();
            store.upsert(entity(1, "Created"));
            let tally = tally(&store);

            assert!(!store.remove(&4));
            assert_eq!(tally.removed.load(Ordering::SeqCst), 0);
            assert!(!store.is_empty());
        }

        #[test]
        fn clear_fires_one_removed_per_entry() {
            let store = store();
            store.upsert(entity(1, "One"));
            store.upsert(entity(2, "Two"));
            let tally = tally(&store);

            store.clear();

            assert_eq!(tally.removed.load(Ordering::SeqCst), 2);
            assert!(store.values().is_empty());
            assert_eq!(store.len(), 0);
        }

        #[test]
        fn clear_on_empty_fires_nothing() {
            let store = store();
            let tally = tally(&store);
            store.clear();
            assert_eq!(tally.removed.load(Ordering::SeqCst), 0);
        }

        #[test]
        fn observer_may_reinsert_during_clear() {
            let store = Arc::new(store());
            store.upsert(entity(1, "One"));

            let inner = Arc::clone(&store);
            store.on_removed(move |e| {
                if e.item.property == "One" {
                    inner.upsert(entity(1, "Again"));
                }
            });

            store.clear();
            assert_eq!(store.get(&1).unwrap().property, "Again");
        }
    }

    // ==============================================
    // Enumeration order
    // ==============================================

    mod ordering {
        use super::*;

        #[test]
        fn keys_follow_insertion_order() {
            let store = store();
            for id in [3, 1, 2] {
                store.upsert(entity(id, "v"));
            }

            assert_eq!(store.keys(), vec![3, 1, 2]);
        }

        #[test]
        fn values_follow_insertion_order() {
            let store = store();
            let one = entity(1, "One");
            let two = entity(2, "Two");
            store.upsert(one.clone());
            store.upsert(two.clone());

            let values: Vec<Entity> = store.values().iter().map(|v| (**v).clone()).collect();
            assert_eq!(values, vec![one, two]);
        }

        #[test]
        fn update_keeps_position_and_reinsert_moves_to_end() {
            let store = store();
            for id in 1..=3 {
                store.upsert(entity(id, "v"));
            }

            store.upsert(entity(1, "updated"));
            assert_eq!(store.keys(), vec![1, 2, 3]);

            store.remove(&1);
            store.upsert(entity(1, "back"));
            assert_eq!(store.keys(), vec![2, 3, 1]);
        }
    }

    // ==============================================
    // Builder
    // ==============================================

    mod builder {
        use super::*;

        #[test]
        fn missing_selector_is_config_error() {
            let err = KeyedStore::<u32, Entity>::builder().try_build().unwrap_err();
            assert!(err.message().contains("key selector"));
        }

        #[test]
        #[should_panic(expected = "key selector")]
        fn build_panics_without_selector() {
            let _ = KeyedStoreBuilder::<u32, Entity>::new().build();
        }

        #[test]
        fn built_store_uses_selector() {
            let store = KeyedStore::builder()
                .key_selector(|e: &Entity| e.id * 10)
                .with_capacity(8)
                .build();
            store.upsert(entity(4, "forty"));

            assert!(store.exists(&40));
            assert_eq!(store.key_of(&entity(5, "")), 50);
        }
    }

    // ==============================================
    // Metrics
    // ==============================================

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counters_follow_operations() {
            let store = store();
            store.upsert(entity(1, "a"));
            store.upsert(entity(1, "b"));
            store.upsert(entity(2, "c"));
            let _ = store.find(&1);
            let _ = store.find(&3);
            store.remove(&1);
            store.clear();

            let snap = store.metrics_snapshot();
            assert_eq!(snap.inserts, 2);
            assert_eq!(snap.updates, 1);
            assert_eq!(snap.lookups, 2);
            assert_eq!(snap.misses, 1);
            assert_eq!(snap.removes, 2);
            assert_eq!(snap.clears, 1);
            assert_eq!(snap.len, 0);
        }
    }

    // ==============================================
    // Property Tests
    // ==============================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Exactly one Added or Updated per upsert; Added count equals distinct keys.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_one_event_per_upsert(ids in prop::collection::vec(0u32..20, 0..100)) {
                let store = store();
                let tally = tally(&store);

                for &id in &ids {
                    store.upsert(entity(id, "v"));
                }

                let distinct = ids.iter().collect::<std::collections::HashSet<_>>().len();
                prop_assert_eq!(tally.added.load(Ordering::SeqCst), distinct);
                prop_assert_eq!(
                    tally.added.load(Ordering::SeqCst) + tally.updated.load(Ordering::SeqCst),
                    ids.len()
                );
                prop_assert_eq!(store.len(), distinct);
            }

            /// clear() on M entries fires M Removed and empties the store.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_clear_fires_per_entry(ids in prop::collection::vec(0u32..50, 0..80)) {
                let store = store();
                store.upsert_many(ids.iter().map(|&id| entity(id, "v")));
                let entries = store.len();
                let tally = tally(&store);

                store.clear();

                prop_assert_eq!(tally.removed.load(Ordering::SeqCst), entries);
                prop_assert!(store.is_empty());
            }
        }
    }
}
