//! Error types for the observekit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when container configuration is invalid
//!   (zero limit, missing key selector).
//! - [`NotFoundError`]: Returned by [`KeyedStore::get`](crate::store::keyed::KeyedStore::get)
//!   when no entry exists for the requested key. Every other lookup reports
//!   absence through `Option`, `bool`, or [`Attempt`](crate::attempt::Attempt).
//! - [`ObserveError`]: Umbrella enum so callers can use `?` across containers.
//!
//! ## Example Usage
//!
//! ```
//! use observekit::error::ConfigError;
//! use observekit::policy::fifo::BoundedQueue;
//!
//! let queue: Result<BoundedQueue<i32>, ConfigError> = BoundedQueue::try_new(5);
//! assert!(queue.is_ok());
//!
//! // A zero limit is caught without panicking
//! let bad = BoundedQueue::<i32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when container configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`BoundedQueue::try_new`](crate::policy::fifo::BoundedQueue::try_new) and
/// builder `try_build()` methods. Carries a human-readable description of
/// which parameter failed validation.
///
/// # Example
///
/// ```
/// use observekit::policy::lifo::BoundedStack;
///
/// let err = BoundedStack::<u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("limit"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// NotFoundError
// ---------------------------------------------------------------------------

/// Error returned when an indexed lookup targets a key with no entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct NotFoundError(String);

impl NotFoundError {
    /// Creates a new `NotFoundError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// ObserveError
// ---------------------------------------------------------------------------

/// Any error surfaced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObserveError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
