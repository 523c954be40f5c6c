pub mod keyed;

pub use keyed::{KeySelector, KeyedStore, KeyedStoreBuilder};
