//! Core of the BucketGate façade: object store client and archive builder.
//!
//! BucketGate serves objects out of an S3-compatible store (MinIO, AWS S3)
//! over HTTP. This crate holds everything below the HTTP layer:
//!
//! - **Configuration** ([`config`]): immutable store and façade settings,
//!   loaded from the environment at startup.
//! - **Errors** ([`error`]): the [`StoreError`](error::StoreError) taxonomy
//!   every fallible core path surfaces.
//! - **Object store** ([`store`]): the [`ObjectStore`](store::ObjectStore)
//!   trait with an AWS SDK implementation and an in-memory one.
//! - **Archive building** ([`archive`]): the folder-to-ZIP assembly path,
//!   with all-or-nothing failure semantics.
//!
//! # Architecture
//!
//! ```text
//! bucketgate-http (router + hyper service)
//!        |
//!        v
//! ObjectStore trait  <--- build_folder_archive
//!    |         |
//!    v         v
//! S3Store   MemoryStore
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod store;

pub use archive::build_folder_archive;
pub use config::{FacadeConfig, StoreConfig};
pub use error::StoreError;
pub use store::{MemoryStore, ObjectStore, S3Store};
