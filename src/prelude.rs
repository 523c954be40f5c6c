pub use crate::attempt::Attempt;
pub use crate::builder::{BoundedDeque, DequeBuilder, EvictionOrder};
pub use crate::error::{ConfigError, NotFoundError, ObserveError};
pub use crate::event::{
    Added, Dequeued, Enqueued, Observers, Popped, Pushed, Removed, SubscriptionId, Updated,
};
#[cfg(feature = "metrics")]
pub use crate::metrics::{DequeMetricsSnapshot, StoreMetricsSnapshot};
pub use crate::policy::fifo::BoundedQueue;
pub use crate::policy::lifo::BoundedStack;
pub use crate::store::keyed::{KeyedStore, KeyedStoreBuilder};
pub use crate::traits::{BoundedContainer, ConcurrentContainer};
