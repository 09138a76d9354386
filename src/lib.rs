#![forbid(unsafe_code)]

//! Ordered key-value storage on a red-black tree.
//!
//! The tree lives in `non_concurrent`: it takes `&mut self` for every mutation and
//! does no internal locking. Share it across threads only behind a lock that covers whole operations.

pub mod error;

// not concurrent
pub mod non_concurrent;

pub use error::TreeError;
pub use non_concurrent::rbtree::{Color, InvariantViolation, Iter, RBTree, Splice};
