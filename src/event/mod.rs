//! Notification payloads and the observer list that delivers them.
//!
//! ## Architecture
//!
//! ```text
//!   container mutation ──► lock released ──► Observers<E>::notify(&E)
//!                                               │
//!                                               ├─► callback #1 (registration order)
//!                                               ├─► callback #2
//!                                               └─► ...
//! ```
//!
//! Each container owns one [`Observers`] list per event kind. Payloads are
//! plain structs carrying the affected item:
//!
//! | Container      | Events                                   |
//! |----------------|------------------------------------------|
//! | `KeyedStore`   | [`Added`], [`Updated`], [`Removed`]      |
//! | `BoundedQueue` | [`Enqueued`], [`Dequeued`]               |
//! | `BoundedStack` | [`Pushed`], [`Popped`]                   |

pub mod observer;

pub use observer::{Observers, SubscriptionId};

macro_rules! event_payload {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name<T> {
            pub item: T,
        }

        impl<T> $name<T> {
            #[inline]
            pub fn new(item: T) -> Self {
                Self { item }
            }

            #[inline]
            pub fn item(&self) -> &T {
                &self.item
            }

            #[inline]
            pub fn into_item(self) -> T {
                self.item
            }
        }
    };
}

event_payload!(
    /// A value was stored under a key that had no entry.
    Added
);
event_payload!(
    /// A value replaced the existing entry for its key.
    Updated
);
event_payload!(
    /// An entry was removed from the store.
    Removed
);
event_payload!(
    /// An item was appended at the tail of a queue.
    Enqueued
);
event_payload!(
    /// An item was taken from the head of a queue, by a caller or by eviction.
    Dequeued
);
event_payload!(
    /// An item was pushed on top of a stack.
    Pushed
);
event_payload!(
    /// An item was taken from the top of a stack, by a caller or by eviction.
    Popped
);
