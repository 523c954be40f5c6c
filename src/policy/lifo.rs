//! LIFO (Last In, First Out) bounded stack.
//!
//! A stack with a fixed `limit` that never rejects a push. When a push takes
//! the length past the limit, one element is popped from the top, which is the
//! element that was just pushed. The overflowing push is still accepted and
//! notified; it is then immediately reversed by the eviction. This is the
//! opposite of [`BoundedQueue`](crate::policy::fifo::BoundedQueue), which
//! discards its oldest element.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        BoundedStack<T> Layout                               │
//! │                                                                             │
//! │   items: Mutex<Vec<T>>                                                      │
//! │                                                                             │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │                    LIFO Eviction (Stack)                            │   │
//! │   │                                                                     │   │
//! │   │   limit = 5, push 1..=5:                                            │   │
//! │   │     [1] [2] [3] [4] [5]                                             │   │
//! │   │     bottom          ^top                                            │   │
//! │   │                                                                     │   │
//! │   │   push(6): Pushed(6) fires                                          │   │
//! │   │     [1] [2] [3] [4] [5] [6]     len 6 > limit                       │   │
//! │   │                                                                     │   │
//! │   │   evict: pop top → Popped(6) fires                                  │   │
//! │   │     [1] [2] [3] [4] [5]                                             │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! │                                                                             │
//! │   pushed: Observers<Pushed<T>>        popped: Observers<Popped<T>>          │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation | Time   | Notes                                      |
//! |-----------|--------|--------------------------------------------|
//! | `push`    | O(1)*  | *Amortized, may pop the top back off       |
//! | `try_pop` | O(1)   | Fails without an event when empty          |
//! | `peek`    | O(1)   | Clones the top, no event                   |
//! | `values`  | O(n)   | Top-to-bottom snapshot                     |
//!
//! ## Use Cases
//!
//! - Undo buffers that must not grow past a fixed depth
//! - Keeping the first `limit` items of a burst and ignoring the rest
//!
//! ## Thread Safety
//!
//! Same model as the FIFO queue: each primitive holds the internal lock only
//! for the `Vec` call, observers run unlocked on the calling thread, and a
//! reader racing a push may transiently see `len() == limit() + 1`. Under
//! concurrent pushes the element evicted is whatever is on top at that
//! moment, which need not be the caller's own item.
//!
//! ## Example Usage
//!
//! ```
//! use observekit::policy::lifo::BoundedStack;
//!
//! let stack = BoundedStack::new(5);
//! for i in 1..=6 {
//!     stack.push(i);
//! }
//!
//! // 6 was pushed, notified, and popped again.
//! assert_eq!(stack.values(), vec![5, 4, 3, 2, 1]);
//! ```

use std::fmt;

use parking_lot::Mutex;

use crate::attempt::Attempt;
use crate::error::ConfigError;
use crate::event::{Observers, Popped, Pushed, SubscriptionId};
#[cfg(feature = "metrics")]
use crate::metrics::counters::DequeCounters;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::DequeMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::traits::{BoundedContainer, ConcurrentContainer};

/// Thread-safe LIFO stack that discards the newest element on overflow.
///
/// # Example
///
/// ```
/// use observekit::policy::lifo::BoundedStack;
///
/// let stack = BoundedStack::new(2);
/// stack.push("a");
/// stack.push("b");
/// stack.push("c");
///
/// assert_eq!(stack.try_pop().into_value(), Some("b"));
/// ```
pub struct BoundedStack<T> {
    /// Bottom at index 0, top at the end.
    items: Mutex<Vec<T>>,
    limit: usize,
    pushed: Observers<Pushed<T>>,
    popped: Observers<Popped<T>>,
    #[cfg(feature = "metrics")]
    metrics: DequeCounters,
}

impl<T> BoundedStack<T> {
    /// Creates a stack retaining at most `limit` items.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero. For a non-panicking alternative, use
    /// [`try_new`](Self::try_new).
    pub fn new(limit: usize) -> Self {
        match Self::try_new(limit) {
            Ok(stack) => stack,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a stack, returning an error instead of panicking on a zero limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `limit` is zero.
    pub fn try_new(limit: usize) -> Result<Self, ConfigError> {
        if limit == 0 {
            return Err(ConfigError::new("stack limit must be a positive integer"));
        }

        Ok(Self {
            items: Mutex::new(Vec::with_capacity(limit.saturating_add(1))),
            limit,
            pushed: Observers::new(),
            popped: Observers::new(),
            #[cfg(feature = "metrics")]
            metrics: DequeCounters::default(),
        })
    }

    /// Removes and returns the top element.
    ///
    /// Fires `Popped` on success; an empty stack fires nothing.
    pub fn try_pop(&self) -> Attempt<T> {
        let top = self.items.lock().pop();

        match top {
            Some(item) => {
                #[cfg(feature = "metrics")]
                self.metrics.inc_removal();

                let event = Popped::new(item);
                self.popped.notify(&event);
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

    /// Registers a callback fired after every push, before any eviction.
    pub fn on_pushed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Pushed<T>) + Send + Sync + 'static,
    {
        self.pushed.subscribe(callback)
    }

    pub fn unsubscribe_pushed(&self, id: SubscriptionId) -> bool {
        self.pushed.unsubscribe(id)
    }

    /// Registers a callback fired for every popped element, including
    /// evictions.
    pub fn on_popped<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Popped<T>) + Send + Sync + 'static,
    {
        self.popped.subscribe(callback)
    }

    pub fn unsubscribe_popped(&self, id: SubscriptionId) -> bool {
        self.popped.unsubscribe(id)
    }

    /// Pops once from the top if the stack is over its limit.
    fn evict_if_needed(&self) {
        let len = self.len();
        if len <= self.limit {
            return;
        }

        tracing::debug!(limit = self.limit, len, "stack over limit, evicting top");
        if self.try_pop().success() {
            #[cfg(feature = "metrics")]
            self.metrics.inc_eviction();
        }
    }
}

impl<T: Clone> BoundedStack<T> {
    /// Pushes `item` on top.
    ///
    /// Always fires `Pushed`. If the stack then holds more than `limit`
    /// items, exactly one element is popped from the top, firing `Popped`.
    pub fn push(&self, item: T) {
        self.items.lock().push(item.clone());

        #[cfg(feature = "metrics")]
        self.metrics.inc_insert();

        self.pushed.notify(&Pushed::new(item));
        self.evict_if_needed();
    }

    /// Returns a copy of the top element without removing it.
    pub fn peek(&self) -> Option<T> {
        self.items.lock().last().cloned()
    }

    /// Snapshot of the contents, top to bottom.
    pub fn values(&self) -> Vec<T> {
        self.items.lock().iter().rev().cloned().collect()
    }
}

#[cfg(feature = "metrics")]
impl<T> BoundedStack<T> {
    pub fn metrics_snapshot(&self) -> DequeMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.limit)
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<DequeMetricsSnapshot> for BoundedStack<T> {
    fn snapshot(&self) -> DequeMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<T> fmt::Debug for BoundedStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedStack")
            .field("limit", &self.limit)
            .field("len", &self.len())
            .field("pushed_observers", &self.pushed.len())
            .field("popped_observers", &self.popped.len())
            .finish_non_exhaustive()
    }
}

impl<T: Clone> BoundedContainer<T> for BoundedStack<T> {
    #[inline]
    fn insert(&self, item: T) {
        self.push(item);
    }

    #[inline]
    fn try_remove(&self) -> Attempt<T> {
        self.try_pop()
    }

    #[inline]
    fn peek(&self) -> Option<T> {
        BoundedStack::peek(self)
    }

    #[inline]
    fn len(&self) -> usize {
        BoundedStack::len(self)
    }

    #[inline]
    fn limit(&self) -> usize {
        self.limit
    }

    fn values(&self) -> Vec<T> {
        BoundedStack::values(self)
    }
}

impl<T: Send> ConcurrentContainer for BoundedStack<T> {}
