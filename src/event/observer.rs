//! Ordered callback list with subscription handles.
//!
//! Callbacks are invoked synchronously, on the notifying thread, in the order
//! they were registered. `notify` snapshots the list before calling out, so a
//! callback may subscribe, unsubscribe, or touch the owning container without
//! deadlocking; changes made during a notification apply from the next one.
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use observekit::event::Observers;
//!
//! let observers: Observers<u32> = Observers::new();
//! let total = Arc::new(AtomicUsize::new(0));
//!
//! let sink = Arc::clone(&total);
//! let id = observers.subscribe(move |n: &u32| {
//!     sink.fetch_add(*n as usize, Ordering::Relaxed);
//! });
//!
//! observers.notify(&5);
//! assert!(observers.unsubscribe(id));
//! observers.notify(&5);
//!
//! assert_eq!(total.load(Ordering::Relaxed), 5);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Shared callback stored in an [`Observers`] list.
pub type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

// Process-wide so a handle never matches an entry in another list.
static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(0);

/// Handle returned by [`Observers::subscribe`].
///
/// Not `Copy`: [`Observers::unsubscribe`] takes the handle by value, so a
/// subscription can only be cancelled once through the same handle.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Thread-safe list of callbacks for one event kind.
pub struct Observers<E> {
    callbacks: RwLock<Vec<(u64, Callback<E>)>>,
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self {
            callbacks: RwLock::new(Vec::new()),
        }
    }

    /// Registers `callback` after every existing one.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed);
        self.callbacks.write().push((id, Arc::new(callback)));
        tracing::trace!(subscription = id, "observer subscribed");
        SubscriptionId(id)
    }

    /// Removes the callback registered under `id`.
    ///
    /// Returns `false` if the handle belongs to a different list.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.callbacks.write();
        match callbacks.iter().position(|(existing, _)| *existing == id.0) {
            Some(index) => {
                // `remove`, not `swap_remove`: registration order is observable.
                callbacks.remove(index);
                tracing::trace!(subscription = id.0, "observer unsubscribed");
                true
            },
            None => false,
        }
    }

    /// Invokes every registered callback with `event`, in registration order.
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<Callback<E>> = {
            let callbacks = self.callbacks.read();
            if callbacks.is_empty() {
                return;
            }
            callbacks.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };

        for callback in snapshot {
            callback(event);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.callbacks.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.callbacks.read().is_empty()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
