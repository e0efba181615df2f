//! Error taxonomy for store operations and archive building.
//!
//! Every fallible path in the core surfaces a [`StoreError`]. The HTTP layer
//! maps all variants to a generic 500 response; the variant detail is logged
//! server-side only, never exposed to callers.

/// Errors produced by the object store client and the archive builder.
///
/// The core never retries: a failed store call aborts the current operation
/// and propagates.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The connection could not be established, or the operation timed out.
    #[error("object store unavailable: {message}")]
    Unavailable {
        /// Underlying failure description.
        message: String,
    },

    /// The requested key does not exist.
    #[error("object not found: {key}")]
    NotFound {
        /// The missing key.
        key: String,
    },

    /// The store rejected a list request.
    #[error("listing bucket {bucket} failed: {message}")]
    List {
        /// Bucket the listing targeted.
        bucket: String,
        /// Underlying failure description.
        message: String,
    },

    /// The store rejected a get request for reasons other than a missing key.
    #[error("fetching {key} failed: {message}")]
    Fetch {
        /// Key the fetch targeted.
        key: String,
        /// Underlying failure description.
        message: String,
    },

    /// The store rejected a put request.
    #[error("storing {key} failed: {message}")]
    Put {
        /// Key the put targeted.
        key: String,
        /// Underlying failure description.
        message: String,
    },

    /// Local archive serialization failed. Includes the empty-entry-name
    /// policy rejection (key equal to the requested prefix).
    #[error("archive encoding failed: {message}")]
    Archive {
        /// Underlying failure description.
        message: String,
    },
}

impl StoreError {
    /// Shorthand for an [`StoreError::Archive`] failure.
    #[must_use]
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive {
            message: message.into(),
        }
    }

    /// Shorthand for an [`StoreError::Unavailable`] failure.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
