//! Unified builder for the bounded containers.
//!
//! Picks FIFO or LIFO eviction at runtime while exposing one API, for callers
//! that take the order from configuration.
//!
//! ## Example
//!
//! ```rust
//! use observekit::builder::{DequeBuilder, EvictionOrder};
//!
//! let window = DequeBuilder::new(3).build::<u32>(EvictionOrder::Fifo);
//! for i in 1..=5 {
//!     window.insert(i);
//! }
//! assert_eq!(window.values(), vec![3, 4, 5]);
//! ```

use std::fmt;

use crate::attempt::Attempt;
use crate::error::ConfigError;
use crate::event::SubscriptionId;
use crate::policy::fifo::BoundedQueue;
use crate::policy::lifo::BoundedStack;
use crate::traits::{BoundedContainer, ConcurrentContainer};

/// Which end an overflowing insert is compensated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvictionOrder {
    /// Queue semantics: the oldest element is discarded.
    Fifo,
    /// Stack semantics: the newest element is discarded.
    Lifo,
}

/// Bounded container whose eviction order was chosen at build time.
pub struct BoundedDeque<T> {
    inner: DequeInner<T>,
}

enum DequeInner<T> {
    Fifo(BoundedQueue<T>),
    Lifo(BoundedStack<T>),
}

impl<T> BoundedDeque<T> {
    pub fn order(&self) -> EvictionOrder {
        match &self.inner {
            DequeInner::Fifo(_) => EvictionOrder::Fifo,
            DequeInner::Lifo(_) => EvictionOrder::Lifo,
        }
    }

    /// Removes the element at the removal end (head for FIFO, top for LIFO).
    pub fn try_remove(&self) -> Attempt<T> {
        match &self.inner {
            DequeInner::Fifo(queue) => queue.try_dequeue(),
            DequeInner::Lifo(stack) => stack.try_pop(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.inner {
            DequeInner::Fifo(queue) => queue.len(),
            DequeInner::Lifo(stack) => stack.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn limit(&self) -> usize {
        match &self.inner {
            DequeInner::Fifo(queue) => queue.limit(),
            DequeInner::Lifo(stack) => stack.limit(),
        }
    }

    /// Registers a callback for every insert (`Enqueued` or `Pushed`).
    pub fn on_inserted<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        match &self.inner {
            DequeInner::Fifo(queue) => queue.on_enqueued(move |e| callback(&e.item)),
            DequeInner::Lifo(stack) => stack.on_pushed(move |e| callback(&e.item)),
        }
    }

    pub fn unsubscribe_inserted(&self, id: SubscriptionId) -> bool {
        match &self.inner {
            DequeInner::Fifo(queue) => queue.unsubscribe_enqueued(id),
            DequeInner::Lifo(stack) => stack.unsubscribe_pushed(id),
        }
    }

    /// Registers a callback for every removal (`Dequeued` or `Popped`),
    /// evictions included.
    pub fn on_removed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        match &self.inner {
            DequeInner::Fifo(queue) => queue.on_dequeued(move |e| callback(&e.item)),
            DequeInner::Lifo(stack) => stack.on_popped(move |e| callback(&e.item)),
        }
    }

    pub fn unsubscribe_removed(&self, id: SubscriptionId) -> bool {
        match &self.inner {
            DequeInner::Fifo(queue) => queue.unsubscribe_dequeued(id),
            DequeInner::Lifo(stack) => stack.unsubscribe_popped(id),
        }
    }
}

impl<T: Clone> BoundedDeque<T> {
    pub fn insert(&self, item: T) {
        match &self.inner {
            DequeInner::Fifo(queue) => queue.enqueue(item),
            DequeInner::Lifo(stack) => stack.push(item),
        }
    }

    pub fn peek(&self) -> Option<T> {
        match &self.inner {
            DequeInner::Fifo(queue) => queue.peek(),
            DequeInner::Lifo(stack) => stack.peek(),
        }
    }

    /// Snapshot in removal order.
    pub fn values(&self) -> Vec<T> {
        match &self.inner {
            DequeInner::Fifo(queue) => queue.values(),
            DequeInner::Lifo(stack) => stack.values(),
        }
    }
}

impl<T: Clone> BoundedContainer<T> for BoundedDeque<T> {
    fn insert(&self, item: T) {
        BoundedDeque::insert(self, item);
    }

    fn try_remove(&self) -> Attempt<T> {
        BoundedDeque::try_remove(self)
    }

    fn peek(&self) -> Option<T> {
        BoundedDeque::peek(self)
    }

    fn len(&self) -> usize {
        BoundedDeque::len(self)
    }

    fn limit(&self) -> usize {
        BoundedDeque::limit(self)
    }

    fn values(&self) -> Vec<T> {
        BoundedDeque::values(self)
    }
}

impl<T: Send> ConcurrentContainer for BoundedDeque<T> {}

impl<T> fmt::Debug for BoundedDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            DequeInner::Fifo(queue) => f.debug_tuple("BoundedDeque").field(queue).finish(),
            DequeInner::Lifo(stack) => f.debug_tuple("BoundedDeque").field(stack).finish(),
        }
    }
}

/// Builder for creating bounded containers.
#[derive(Debug, Clone, Copy)]
pub struct DequeBuilder {
    limit: usize,
}

impl DequeBuilder {
    /// Create a new builder with the specified limit.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Build a container with the specified eviction order.
    ///
    /// # Panics
    ///
    /// Panics if the limit is zero. For a non-panicking alternative, use
    /// [`try_build`](Self::try_build).
    ///
    /// # Example
    ///
    /// ```rust
    /// use observekit::builder::{DequeBuilder, EvictionOrder};
    ///
    /// let undo = DequeBuilder::new(50).build::<String>(EvictionOrder::Lifo);
    /// assert_eq!(undo.order(), EvictionOrder::Lifo);
    /// ```
    pub fn build<T>(self, order: EvictionOrder) -> BoundedDeque<T> {
        match self.try_build(order) {
            Ok(deque) => deque,
            Err(e) => panic!("{}", e),
        }
    }

    /// Build a container, returning an error on a zero limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the limit is zero.
    pub fn try_build<T>(self, order: EvictionOrder) -> Result<BoundedDeque<T>, ConfigError> {
        let inner = match order {
            EvictionOrder::Fifo => DequeInner::Fifo(BoundedQueue::try_new(self.limit)?),
            EvictionOrder::Lifo => DequeInner::Lifo(BoundedStack::try_new(self.limit)?),
        };

        Ok(BoundedDeque { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_both_orders_basic_ops() {
        for order in [EvictionOrder::Fifo, EvictionOrder::Lifo] {
            let deque = DequeBuilder::new(10).build::<String>(order);

            deque.insert("one".to_string());
            deque.insert("two".to_string());

            assert_eq!(deque.len(), 2);
            assert!(!deque.is_empty());
            assert_eq!(deque.limit(), 10);
            assert_eq!(deque.order(), order);

            let first = deque.try_remove().into_value();
            match order {
                EvictionOrder::Fifo => assert_eq!(first.as_deref(), Some("one")),
                EvictionOrder::Lifo => assert_eq!(first.as_deref(), Some("two")),
            }

            let _ = deque.try_remove();
            assert!(deque.is_empty());
            assert!(!deque.try_remove().success());
        }
    }

    #[test]
    fn test_limit_enforcement() {
        let fifo = DequeBuilder::new(5).build::<u32>(EvictionOrder::Fifo);
        let lifo = DequeBuilder::new(5).build::<u32>(EvictionOrder::Lifo);

        for i in 1..=6 {
            fifo.insert(i);
            lifo.insert(i);
        }

        assert_eq!(fifo.values(), vec![2, 3, 4, 5, 6]);
        assert_eq!(lifo.values(), vec![5, 4, 3, 2, 1]);
        assert_eq!(fifo.peek(), Some(2));
        assert_eq!(lifo.peek(), Some(5));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = DequeBuilder::new(0)
            .try_build::<u8>(EvictionOrder::Lifo)
            .unwrap_err();
        assert!(err.message().contains("positive"));
    }

    #[test]
    fn test_generic_callbacks_see_items() {
        for order in [EvictionOrder::Fifo, EvictionOrder::Lifo] {
            let deque = DequeBuilder::new(1).build::<u32>(order);
            let log = Arc::new(Mutex::new(Vec::new()));

            let sink = Arc::clone(&log);
            deque.on_inserted(move |item| {
                sink.lock().unwrap().push(format!("in {item}"));
            });
            let sink = Arc::clone(&log);
            let removed = deque.on_removed(move |item| {
                sink.lock().unwrap().push(format!("out {item}"));
            });

            deque.insert(1);
            deque.insert(2);
            assert!(deque.unsubscribe_removed(removed));
            let _ = deque.try_remove();

            let expected_eviction = match order {
                EvictionOrder::Fifo => "out 1",
                EvictionOrder::Lifo => "out 2",
            };
            assert_eq!(
                *log.lock().unwrap(),
                vec!["in 1", "in 2", expected_eviction]
            );
        }
    }
}
