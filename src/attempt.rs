//! Outcome of a fallible removal.
//!
//! [`Attempt`] is what [`BoundedQueue::try_dequeue`](crate::policy::fifo::BoundedQueue::try_dequeue)
//! and [`BoundedStack::try_pop`](crate::policy::lifo::BoundedStack::try_pop) return:
//! a success flag plus the removed value. An empty container yields a failed
//! attempt with no value, never a panic.
//!
//! ```
//! use observekit::attempt::Attempt;
//!
//! let hit = Attempt::succeeded(7);
//! assert!(hit.success());
//! assert_eq!(hit.value(), Some(&7));
//!
//! let miss: Attempt<i32> = Attempt::failed();
//! assert!(!miss.success());
//! assert_eq!(miss.into_value(), None);
//! ```

/// Success flag and value of a removal; `value` is present iff `success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct Attempt<T> {
    value: Option<T>,
}

impl<T> Attempt<T> {
    #[inline]
    pub fn succeeded(value: T) -> Self {
        Self { value: Some(value) }
    }

    #[inline]
    pub fn failed() -> Self {
        Self { value: None }
    }

    /// Whether an element was actually removed.
    #[inline]
    pub fn success(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[inline]
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T> Default for Attempt<T> {
    fn default() -> Self {
        Self::failed()
    }
}

impl<T> From<Option<T>> for Attempt<T> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        Self { value }
    }
}

impl<T> From<Attempt<T>> for Option<T> {
    #[inline]
    fn from(attempt: Attempt<T>) -> Self {
        attempt.value
    }
}
