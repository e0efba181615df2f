//! Request routing: maps method + path + query to a façade operation.
//!
//! Routing is deliberately strict about what it rejects before the store is
//! ever touched: wrong methods are 405, a missing `file` parameter is 400,
//! unknown paths are 404. Only a fully resolved [`Operation`] reaches the
//! store.

use http::{Method, Uri};

/// A fully resolved façade operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `GET /terraform-state` — download the well-known state object.
    GetTerraformState,
    /// `PUT /terraform-state` — overwrite the well-known state object.
    PutTerraformState,
    /// `GET /template-content?folder=<prefix>` — archive a folder.
    DownloadFolderArchive {
        /// The key prefix selecting the folder. May be empty (whole bucket).
        folder: String,
    },
    /// `GET /?file=<name>[&download=true]` — serve a single file.
    GetFile {
        /// The object key.
        name: String,
        /// Whether to force an attachment download.
        download: bool,
    },
    /// `GET /health` — liveness probe.
    Health,
}

/// Routing rejections, resolved without touching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The path exists but the method is not supported.
    #[error("method not allowed")]
    MethodNotAllowed,
    /// The file endpoint was called without a (non-empty) `file` parameter.
    #[error("missing file parameter")]
    MissingFileParam,
    /// No such path.
    #[error("not found")]
    NotFound,
}

/// Resolve a request line to an [`Operation`].
///
/// # Errors
///
/// Returns a [`RouteError`] describing why the request cannot be served;
/// callers map these straight to 405/400/404 responses.
pub fn resolve(method: &Method, uri: &Uri) -> Result<Operation, RouteError> {
    match uri.path() {
        "/terraform-state" => match *method {
            Method::GET => Ok(Operation::GetTerraformState),
            Method::PUT => Ok(Operation::PutTerraformState),
            _ => Err(RouteError::MethodNotAllowed),
        },

        "/template-content" => {
            if *method != Method::GET {
                return Err(RouteError::MethodNotAllowed);
            }
            let folder = query_param(uri, "folder").unwrap_or_default();
            Ok(Operation::DownloadFolderArchive { folder })
        }

        "/" => {
            if *method != Method::GET {
                return Err(RouteError::MethodNotAllowed);
            }
            let name = query_param(uri, "file").filter(|v| !v.is_empty());
            let Some(name) = name else {
                return Err(RouteError::MissingFileParam);
            };
            let download = query_param(uri, "download").as_deref() == Some("true");
            Ok(Operation::GetFile { name, download })
        }

        "/health" => {
            if *method == Method::GET {
                Ok(Operation::Health)
            } else {
                Err(RouteError::MethodNotAllowed)
            }
        }

        _ => Err(RouteError::NotFound),
    }
}

/// First value of a query parameter, percent-decoded.
fn query_param(uri: &Uri, name: &str) -> Option<String> {
    form_urlencoded::parse(uri.query().unwrap_or("").as_bytes())
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}
