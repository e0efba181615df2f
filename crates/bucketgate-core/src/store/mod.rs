//! The object store abstraction and its implementations.
//!
//! [`ObjectStore`] is the boundary between the façade and the remote
//! S3-compatible store. Two implementations are provided:
//!
//! - [`S3Store`]: backed by the AWS S3 SDK, works against MinIO or AWS S3.
//! - [`MemoryStore`]: in-process map, used by unit tests and local
//!   development, with failure injection for exercising error paths.
//!
//! Keys are opaque strings, unique within a bucket, hierarchical only by
//! convention. All operations are single-attempt; retries are a caller
//! concern (and the façade deliberately has none).

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreError;

mod memory;
mod s3;

pub use memory::MemoryStore;
pub use s3::S3Store;

/// An object key. Opaque to the store; prefix-delimited by convention.
pub type ObjectKey = String;

/// Abstraction over a remote key-value blob store.
///
/// Implementations must be safe to share across concurrently handled
/// requests; all methods take `&self`.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// List every key in `bucket` whose name starts with `prefix`.
    ///
    /// An empty result is a valid, non-error outcome. The returned order is
    /// store-defined and preserved by callers.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] when the connection cannot be established,
    /// [`StoreError::List`] when the store rejects the request.
    async fn list_by_prefix(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectKey>, StoreError>;

    /// Fetch the full content of one object.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the key does not exist,
    /// [`StoreError::Unavailable`] on connection failure or timeout,
    /// [`StoreError::Fetch`] otherwise.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError>;

    /// Upload content, fully overwriting any existing object at `key`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] or [`StoreError::Put`].
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content: Bytes,
    ) -> Result<(), StoreError>;
}
