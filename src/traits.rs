//! # Container Trait Hierarchy
//!
//! Shared interface for the capacity-bounded containers, so callers and tests
//! can be written once against either eviction order.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌─────────────────────────────────────────┐
//!                    │         BoundedContainer<T>             │
//!                    │                                         │
//!                    │  insert(&, T)          (enqueue / push) │
//!                    │  try_remove(&) → Attempt<T>  (deq/pop)  │
//!                    │  peek(&) → Option<T>                    │
//!                    │  len / is_empty / limit                 │
//!                    │  values(&) → Vec<T>   (removal order)   │
//!                    └──────────────────┬──────────────────────┘
//!                                       │
//!          ┌────────────────────────────┼────────────────────────────┐
//!          ▼                            ▼                            ▼
//!   ┌──────────────┐            ┌──────────────┐            ┌──────────────┐
//!   │ BoundedQueue │            │ BoundedStack │            │ BoundedDeque │
//!   │  FIFO, drops │            │  LIFO, drops │            │  either, set │
//!   │  the oldest  │            │  the newest  │            │  at build    │
//!   └──────────────┘            └──────────────┘            └──────────────┘
//! ```
//!
//! ## Eviction Asymmetry
//!
//! Both containers accept every insert, notify it, and then remove exactly one
//! element from their own removal end if the insert overflowed. For a queue
//! that end is the head (the oldest element); for a stack it is the top, which
//! is the element that was just pushed.
//!
//! ```text
//!   limit = 3, insert 1, 2, 3, 4
//!
//!   FIFO:  [1 2 3] + 4 → [1 2 3 4] → dequeue head → [2 3 4]
//!   LIFO:  [3 2 1] + 4 → [4 3 2 1] → pop top      → [3 2 1]
//! ```
//!
//! ## Thread Safety
//!
//! All methods take `&self`. Implementations synchronize internally and are
//! `Send + Sync` when `T` is; see [`ConcurrentContainer`].

use crate::attempt::Attempt;

/// Capacity-bounded container that evicts instead of rejecting.
///
/// # Example
///
/// ```
/// use observekit::policy::fifo::BoundedQueue;
/// use observekit::policy::lifo::BoundedStack;
/// use observekit::traits::BoundedContainer;
///
/// fn fill<C: BoundedContainer<u32>>(c: &C) {
///     for i in 1..=4 {
///         c.insert(i);
///     }
/// }
///
/// let queue = BoundedQueue::new(3);
/// let stack = BoundedStack::new(3);
/// fill(&queue);
/// fill(&stack);
///
/// assert_eq!(queue.values(), vec![2, 3, 4]);
/// assert_eq!(stack.values(), vec![3, 2, 1]);
/// ```
pub trait BoundedContainer<T> {
    /// Inserts at the container's insertion end, evicting one element if the
    /// limit is exceeded afterwards.
    fn insert(&self, item: T);

    /// Removes the element at the container's removal end, if any.
    fn try_remove(&self) -> Attempt<T>;

    /// Returns a copy of the element `try_remove` would take next.
    fn peek(&self) -> Option<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of elements retained once an insert returns.
    fn limit(&self) -> usize;

    /// Snapshot of the contents in removal order.
    fn values(&self) -> Vec<T>;
}

/// Marker for containers safe to share across threads without external locking.
///
/// # Example
///
/// ```
/// use observekit::policy::fifo::BoundedQueue;
/// use observekit::traits::ConcurrentContainer;
///
/// fn share<C: ConcurrentContainer>(_c: &C) {}
///
/// share(&BoundedQueue::<String>::new(4));
/// ```
pub trait ConcurrentContainer: Send + Sync {}
