//! Bounded containers, named by which element they give up on overflow.

pub mod fifo;
pub mod lifo;

pub use fifo::BoundedQueue;
pub use lifo::BoundedStack;
