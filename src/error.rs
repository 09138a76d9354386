use thiserror::Error;

/// Errors surfaced by the keyed operations of [`RBTree`](crate::RBTree).
///
/// Every check happens before the tree is modified, so an `Err` always leaves the tree untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// An absent (`None`) key was passed where a key is required.
    #[error("key must not be absent")]
    IllegalNullKey,

    /// `insert` was called with a key that is already present.
    #[error("key is already present in the tree")]
    DuplicateKey,

    /// The key referenced by a lookup or removal is not in the tree.
    #[error("key not found in the tree")]
    KeyNotFound,
}
