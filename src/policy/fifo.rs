//! FIFO (First In, First Out) bounded queue.
//!
//! A queue with a fixed `limit` that never rejects an insert: when an enqueue
//! pushes the length past the limit, the head (the oldest element) is
//! dequeued. A full queue therefore behaves as a sliding window over the most
//! recent `limit` items.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        BoundedQueue<T> Layout                               │
//! │                                                                             │
//! │   items: Mutex<VecDeque<T>>                                                 │
//! │                                                                             │
//! │       head                                    tail                          │
//! │      ┌─────┬─────┬─────┬─────┬─────┐                                        │
//! │      │  2  │  3  │  4  │  5  │  6  │  ◄── enqueue(6)                        │
//! │      └─────┴─────┴─────┴─────┴─────┘                                        │
//! │         │                                                                   │
//! │         ▼  try_dequeue / eviction                                           │
//! │                                                                             │
//! │   enqueued: Observers<Enqueued<T>>    dequeued: Observers<Dequeued<T>>      │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Enqueue Flow
//! ────────────
//!
//!   enqueue(item):
//!     1. lock, push_back(item), unlock
//!     2. fire Enqueued(item)
//!     3. if len > limit: try_dequeue() once   (fires Dequeued(oldest))
//! ```
//!
//! ## Operations
//!
//! | Operation     | Time | Notes                                        |
//! |---------------|------|----------------------------------------------|
//! | `enqueue`     | O(1) | May evict the head, firing `Dequeued`        |
//! | `try_dequeue` | O(1) | Fails without an event when empty            |
//! | `peek`        | O(1) | Clones the head, no event                    |
//! | `values`      | O(n) | Head-to-tail snapshot                        |
//!
//! ## Thread Safety
//!
//! Each primitive step holds the internal lock only for the duration of the
//! `VecDeque` call. Observers run after the lock is released, on the calling
//! thread, so they may read or mutate the queue themselves.
//!
//! Enqueue and its eviction are two separate steps: a concurrent reader can
//! transiently observe `len() == limit() + 1`. Once `enqueue` returns, the
//! caller's own insert has been compensated by one removal.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use observekit::policy::fifo::BoundedQueue;
//!
//! let queue = BoundedQueue::new(5);
//! let evicted = Arc::new(AtomicUsize::new(0));
//!
//! let counter = Arc::clone(&evicted);
//! queue.on_dequeued(move |_| {
//!     counter.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! for i in 1..=6 {
//!     queue.enqueue(i);
//! }
//!
//! assert_eq!(queue.values(), vec![2, 3, 4, 5, 6]);
//! assert_eq!(evicted.load(Ordering::Relaxed), 1);
//! ```

use std::collections::VecDeque;
use std::fmt;

use parking_lot::Mutex;

use crate::attempt::Attempt;
use crate::error::ConfigError;
use crate::event::{Dequeued, Enqueued, Observers, SubscriptionId};
#[cfg(feature = "metrics")]
use crate::metrics::counters::DequeCounters;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::DequeMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::traits::{BoundedContainer, ConcurrentContainer};

/// Thread-safe FIFO queue that discards its oldest element on overflow.
///
/// # Example
///
/// ```
/// use observekit::policy::fifo::BoundedQueue;
///
/// let queue = BoundedQueue::new(2);
/// queue.enqueue("a");
/// queue.enqueue("b");
/// queue.enqueue("c");
///
/// assert_eq!(queue.len(), 2);
/// assert_eq!(queue.try_dequeue().into_value(), Some("b"));
/// ```
pub struct BoundedQueue<T> {
    items: Mutex<VecDeque<T>>,
    limit: usize,
    enqueued: Observers<Enqueued<T>>,
    dequeued: Observers<Dequeued<T>>,
    #[cfg(feature = "metrics")]
    metrics: DequeCounters,
}

impl<T> BoundedQueue<T> {
    /// Creates a queue retaining at most `limit` items.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero. For a non-panicking alternative, use
    /// [`try_new`](Self::try_new).
    pub fn new(limit: usize) -> Self {
        match Self::try_new(limit) {
            Ok(queue) => queue,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a queue, returning an error instead of panicking on a zero limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `limit` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use observekit::policy::fifo::BoundedQueue;
    ///
    /// assert!(BoundedQueue::<u8>::try_new(1).is_ok());
    /// assert!(BoundedQueue::<u8>::try_new(0).is_err());
    /// ```
    pub fn try_new(limit: usize) -> Result<Self, ConfigError> {
        if limit == 0 {
            return Err(ConfigError::new("queue limit must be a positive integer"));
        }

        Ok(Self {
            items: Mutex::new(VecDeque::with_capacity(limit.saturating_add(1))),
            limit,
            enqueued: Observers::new(),
            dequeued: Observers::new(),
            #[cfg(feature = "metrics")]
            metrics: DequeCounters::default(),
        })
    }

    /// Removes and returns the head element.
    ///
    /// Fires `Dequeued` on success. An empty queue yields a failed
    /// [`Attempt`] and fires nothing.
    pub fn try_dequeue(&self) -> Attempt<T> {
        let head = self.items.lock().pop_front();

        match head {
            Some(item) => {
                #[cfg(feature = "metrics")]
                self.metrics.inc_removal();

                let event = Dequeued::new(item);
                self.dequeued.notify(&event);
                Attempt::succeeded(event.into_item())
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.inc_empty_removal();

                Attempt::failed()
            },
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Registers a callback fired after every enqueue, before any eviction.
    pub fn on_enqueued<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Enqueued<T>) + Send + Sync + 'static,
    {
        self.enqueued.subscribe(callback)
    }

    pub fn unsubscribe_enqueued(&self, id: SubscriptionId) -> bool {
        self.enqueued.unsubscribe(id)
    }

    /// Registers a callback fired for every removed element, including
    /// evictions.
    pub fn on_dequeued<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Dequeued<T>) + Send + Sync + 'static,
    {
        self.dequeued.subscribe(callback)
    }

    pub fn unsubscribe_dequeued(&self, id: SubscriptionId) -> bool {
        self.dequeued.unsubscribe(id)
    }

    /// Drops one head element if the queue is over its limit.
    fn evict_if_needed(&self) {
        let len = self.len();
        if len <= self.limit {
            return;
        }

        tracing::debug!(limit = self.limit, len, "queue over limit, evicting oldest");
        if self.try_dequeue().success() {
            #[cfg(feature = "metrics")]
            self.metrics.inc_eviction();
        }
    }
}

impl<T: Clone> BoundedQueue<T> {
    /// Appends `item` at the tail.
    ///
    /// Always fires `Enqueued`. If the queue then holds more than `limit`
    /// items, exactly one head element is dequeued, firing `Dequeued`.
    pub fn enqueue(&self, item: T) {
        self.items.lock().push_back(item.clone());

        #[cfg(feature = "metrics")]
        self.metrics.inc_insert();

        self.enqueued.notify(&Enqueued::new(item));
        self.evict_if_needed();
    }

    /// Returns a copy of the head element without removing it.
    pub fn peek(&self) -> Option<T> {
        self.items.lock().front().cloned()
    }

    /// Snapshot of the contents, head to tail.
    pub fn values(&self) -> Vec<T> {
        self.items.lock().iter().cloned().collect()
    }
}

#[cfg(feature = "metrics")]
impl<T> BoundedQueue<T> {
    pub fn metrics_snapshot(&self) -> DequeMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.limit)
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<DequeMetricsSnapshot> for BoundedQueue<T> {
    fn snapshot(&self) -> DequeMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<T> fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedQueue")
            .field("limit", &self.limit)
            .field("len", &self.len())
            .field("enqueued_observers", &self.enqueued.len())
            .field("dequeued_observers", &self.dequeued.len())
            .finish_non_exhaustive()
    }
}

impl<T: Clone> BoundedContainer<T> for BoundedQueue<T> {
    #[inline]
    fn insert(&self, item: T) {
        self.enqueue(item);
    }

    #[inline]
    fn try_remove(&self) -> Attempt<T> {
        self.try_dequeue()
    }

    #[inline]
    fn peek(&self) -> Option<T> {
        BoundedQueue::peek(self)
    }

    #[inline]
    fn len(&self) -> usize {
        BoundedQueue::len(self)
    }

    #[inline]
    fn limit(&self) -> usize {
        self.limit
    }

    fn values(&self) -> Vec<T> {
        BoundedQueue::values(self)
    }
}

impl<T: Send> ConcurrentContainer for BoundedQueue<T> {}
