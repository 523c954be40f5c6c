//! observekit: thread-safe, event-notifying containers.
//!
//! - [`KeyedStore`](store::keyed::KeyedStore): values deduplicated by a key
//!   derived from each value, with `Added` / `Updated` / `Removed` callbacks.
//! - [`BoundedQueue`](policy::fifo::BoundedQueue): FIFO that drops its oldest
//!   element on overflow, with `Enqueued` / `Dequeued` callbacks.
//! - [`BoundedStack`](policy::lifo::BoundedStack): LIFO that drops its newest
//!   element on overflow, with `Pushed` / `Popped` callbacks.
//!
//! Every container is `Send + Sync` and synchronizes internally. Callbacks
//! run synchronously on the mutating thread, after the container's lock has
//! been released, in registration order.

pub mod attempt;
pub mod builder;
pub mod error;
pub mod event;
pub mod policy;
pub mod prelude;
pub mod store;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;
