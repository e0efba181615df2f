//! The façade's hyper `Service`.
//!
//! [`FacadeService`] ties routing, store access, archive building, and
//! response construction into a single hyper-compatible service:
//!
//! 1. Route resolution (method + path + query), rejecting before any store
//!    access where possible
//! 2. Request body collection (state uploads only)
//! 3. Store / archive-builder calls
//! 4. Error-to-500 mapping with server-side logging
//! 5. Common response headers (`x-request-id`, `Server`)
//!
//! The service is generic over the store, so tests run it against
//! [`MemoryStore`](bucketgate_core::MemoryStore) with no network involved.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bucketgate_core::{FacadeConfig, ObjectStore, StoreError, build_folder_archive};
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::service::Service;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::body::FacadeBody;
use crate::response;
use crate::router::{self, Operation, RouteError};

/// Value of the `Server` response header.
const SERVER_NAME: &str = concat!("bucketgate/", env!("CARGO_PKG_VERSION"));

/// The façade HTTP service.
///
/// Holds the shared store and configuration; cheap to clone per connection.
#[derive(Debug)]
pub struct FacadeService<S: ObjectStore> {
    store: Arc<S>,
    config: Arc<FacadeConfig>,
}

impl<S: ObjectStore> FacadeService<S> {
    /// Create a service around the given store and configuration.
    #[must_use]
    pub fn new(store: S, config: FacadeConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Create a service from an already shared store.
    #[must_use]
    pub fn from_shared(store: Arc<S>, config: Arc<FacadeConfig>) -> Self {
        Self { store, config }
    }
}

impl<S: ObjectStore> Clone for FacadeService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S, B> Service<http::Request<B>> for FacadeService<S>
where
    S: ObjectStore,
    B: http_body::Body + Send + 'static,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    type Response = http::Response<FacadeBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let store = Arc::clone(&self.store);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            let request_id = Uuid::new_v4().to_string();
            let response = process_request(req, store.as_ref(), &config, &request_id).await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Run one request through routing, dispatch, and error mapping.
async fn process_request<S, B>(
    req: http::Request<B>,
    store: &S,
    config: &FacadeConfig,
    request_id: &str,
) -> http::Response<FacadeBody>
where
    S: ObjectStore,
    B: http_body::Body + Send + 'static,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    let method = req.method().clone();
    let uri = req.uri().clone();

    let operation = match router::resolve(&method, &uri) {
        Ok(op) => op,
        Err(err) => {
            debug!(request_id = %request_id, method = %method, path = %uri.path(), error = %err, "rejected request");
            return route_error_response(&err);
        }
    };

    debug!(request_id = %request_id, operation = ?operation, "dispatching request");

    match operation {
        Operation::Health => response::health(env!("CARGO_PKG_VERSION")),

        Operation::GetTerraformState => {
            match store
                .get_object(&config.state_bucket, &config.state_key)
                .await
            {
                Ok(content) => response::attachment(
                    &config.state_key,
                    mime::APPLICATION_OCTET_STREAM.as_ref(),
                    content,
                ),
                Err(err) => log_and_map(&err, request_id, "get terraform state"),
            }
        }

        Operation::PutTerraformState => {
            let body = match req.into_body().collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(err) => {
                    error!(request_id = %request_id, error = %err, "failed to read state upload body");
                    return response::status_text(
                        http::StatusCode::BAD_REQUEST,
                        "could not read request body",
                    );
                }
            };
            match store
                .put_object(&config.state_bucket, &config.state_key, body)
                .await
            {
                Ok(()) => {
                    info!(request_id = %request_id, key = %config.state_key, "stored terraform state");
                    response::no_content()
                }
                Err(err) => log_and_map(&err, request_id, "put terraform state"),
            }
        }

        Operation::DownloadFolderArchive { folder } => {
            match build_folder_archive(store, &config.template_bucket, &folder).await {
                Ok(content) => {
                    info!(request_id = %request_id, folder = %folder, bytes = content.len(), "built folder archive");
                    response::archive_attachment(&folder, content)
                }
                Err(err) => log_and_map(&err, request_id, "build folder archive"),
            }
        }

        Operation::GetFile { name, download } => {
            match store.get_object(&config.file_bucket, &name).await {
                Ok(content) => {
                    if download {
                        response::attachment(
                            &name,
                            mime::APPLICATION_OCTET_STREAM.as_ref(),
                            content,
                        )
                    } else {
                        response::inline_text(content)
                    }
                }
                Err(err) => log_and_map(&err, request_id, "get file"),
            }
        }
    }
}

/// Log the store failure server-side and return the generic 500.
fn log_and_map(err: &StoreError, request_id: &str, action: &str) -> http::Response<FacadeBody> {
    error!(request_id = %request_id, action = %action, error = %err, "store operation failed");
    response::store_error(err)
}

/// Map a routing rejection to its status response.
fn route_error_response(err: &RouteError) -> http::Response<FacadeBody> {
    match err {
        RouteError::MethodNotAllowed => {
            response::status_text(http::StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
        }
        RouteError::MissingFileParam => response::status_text(
            http::StatusCode::BAD_REQUEST,
            "you must specify a file to query for, ?file=pippo.txt",
        ),
        RouteError::NotFound => response::status_text(http::StatusCode::NOT_FOUND, "not found"),
    }
}

/// Attach the headers every response carries.
fn add_common_headers(
    mut response: http::Response<FacadeBody>,
    request_id: &str,
) -> http::Response<FacadeBody> {
    let headers = response.headers_mut();
    if let Ok(value) = http::HeaderValue::from_str(request_id) {
        headers.insert("x-request-id", value);
    }
    headers.insert(
        http::header::SERVER,
        http::HeaderValue::from_static(SERVER_NAME),
    );
    response
}
