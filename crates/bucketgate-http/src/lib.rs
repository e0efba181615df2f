//! HTTP layer of the BucketGate façade.
//!
//! This crate turns HTTP requests into calls on the
//! [`ObjectStore`](bucketgate_core::ObjectStore) and the archive builder:
//!
//! - **Routing** ([`router`]): maps method + path + query to an
//!   [`Operation`](router::Operation), rejecting bad requests before any
//!   store access.
//! - **Service** ([`service`]): [`FacadeService`](service::FacadeService),
//!   the hyper `Service` tying routing, dispatch, error mapping, and common
//!   headers together.
//! - **Responses** ([`response`]): every response the façade emits, including
//!   the generic 500 that hides the store error taxonomy from clients.
//! - **Body** ([`body`]): the [`FacadeBody`](body::FacadeBody) response body.
//!
//! # Architecture
//!
//! ```text
//! HTTP Request
//!   -> FacadeService (hyper Service)
//!     -> router::resolve (405/400/404 without store access)
//!     -> ObjectStore / build_folder_archive
//!     -> response construction (+ x-request-id, Server headers)
//!   <- HTTP Response
//! ```

pub mod body;
pub mod response;
pub mod router;
pub mod service;

pub use body::FacadeBody;
pub use router::{Operation, RouteError};
pub use service::FacadeService;
