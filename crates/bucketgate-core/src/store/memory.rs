//! In-memory object store.
//!
//! [`MemoryStore`] keeps objects in a mutexed `BTreeMap`, so listings come
//! back in a stable lexicographic order. It backs the unit tests and is handy
//! for running the façade without a real store.
//!
//! Failure injection: [`MemoryStore::fail_get_for`] makes one key's fetch
//! fail, and [`MemoryStore::set_unavailable`] makes every operation fail as
//! if the store were unreachable. Both exist so the error paths (notably the
//! archive builder's all-or-nothing guarantee) are testable.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;

use crate::error::StoreError;
use crate::store::{ObjectKey, ObjectStore};

#[derive(Debug, Default)]
struct Inner {
    /// `(bucket, key)` -> content. BTreeMap keeps listing order stable.
    objects: BTreeMap<(String, String), Bytes>,
    /// `(bucket, key)` pairs whose fetch is forced to fail.
    failing_gets: HashSet<(String, String)>,
    /// When set, every operation fails as unavailable.
    unavailable: bool,
}

/// In-process object store for tests and local development.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object, overwriting any existing content.
    pub fn insert(&self, bucket: &str, key: &str, content: impl Into<Bytes>) {
        self.inner
            .lock()
            .objects
            .insert((bucket.to_owned(), key.to_owned()), content.into());
    }

    /// Make the next and all following fetches of `key` fail.
    pub fn fail_get_for(&self, bucket: &str, key: &str) {
        self.inner
            .lock()
            .failing_gets
            .insert((bucket.to_owned(), key.to_owned()));
    }

    /// Toggle simulated store unavailability.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unavailable = unavailable;
    }

    /// Number of stored objects, across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().objects.len()
    }

    /// Whether the store holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().objects.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_by_prefix(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectKey>, StoreError> {
        let inner = self.inner.lock();
        if inner.unavailable {
            return Err(StoreError::unavailable("memory store marked unavailable"));
        }

        Ok(inner
            .objects
            .keys()
            .filter(|(b, k)| b == bucket && k.starts_with(prefix))
            .map(|(_, k)| k.clone())
            .collect())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        let inner = self.inner.lock();
        if inner.unavailable {
            return Err(StoreError::unavailable("memory store marked unavailable"));
        }

        let slot = (bucket.to_owned(), key.to_owned());
        if inner.failing_gets.contains(&slot) {
            return Err(StoreError::Fetch {
                key: key.to_owned(),
                message: String::from("injected fetch failure"),
            });
        }

        inner
            .objects
            .get(&slot)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_owned(),
            })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content: Bytes,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if inner.unavailable {
            return Err(StoreError::unavailable("memory store marked unavailable"));
        }

        inner
            .objects
            .insert((bucket.to_owned(), key.to_owned()), content);
        Ok(())
    }
}
