//! Error types returned by [`TtlMap`](crate::TtlMap) operations.

use thiserror::Error;

/// Result type alias using [`TtlMapError`].
pub type Result<T> = std::result::Result<T, TtlMapError>;

/// Every way a map operation can be rejected.
///
/// All variants are plain values: no payload, no shared state, and none of
/// them leaves the map in a different state than before the call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TtlMapError {
    /// The nil key (`None`) was passed to `insert`, `update` or `remove`.
    #[error("nil key is not acceptable")]
    NilKey,

    /// `insert` found an existing binding for the key, expired or not.
    #[error("key already exists")]
    KeyAlreadyExists,

    /// The key has no binding.
    #[error("item not found")]
    ItemNotFound,

    /// The key is bound but its deadline has passed.
    #[error("item is expired")]
    ItemIsExpired,
}
