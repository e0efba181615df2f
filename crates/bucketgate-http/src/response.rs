//! Response construction.
//!
//! One place builds every response the façade emits: attachment downloads,
//! inline text, status-only replies, the health payload, and the generic 500
//! that every [`StoreError`] maps to. The error taxonomy is logged
//! server-side by the service layer and never exposed to clients.

use bucketgate_core::StoreError;
use bytes::Bytes;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use http::{HeaderValue, Response, StatusCode};

use crate::body::FacadeBody;

/// `application/zip` content type. Not among the `mime` constants.
const APPLICATION_ZIP: &str = "application/zip";

/// A 200 attachment download with the given filename and content type.
#[must_use]
pub fn attachment(filename: &str, content_type: &str, content: Bytes) -> Response<FacadeBody> {
    let disposition = format!("attachment; filename={filename}");
    let mut builder = Response::builder().status(StatusCode::OK);

    // A filename with header-invalid characters degrades to a bare
    // attachment disposition rather than failing the download.
    let disposition = HeaderValue::from_str(&disposition)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    builder = builder.header(CONTENT_DISPOSITION, disposition);

    if let Ok(ct) = HeaderValue::from_str(content_type) {
        builder = builder.header(CONTENT_TYPE, ct);
    }

    builder
        .body(FacadeBody::from_bytes(content))
        .unwrap_or_else(|_| fallback_error())
}

/// A 200 ZIP attachment named `<folder>.zip`.
#[must_use]
pub fn archive_attachment(folder: &str, content: Bytes) -> Response<FacadeBody> {
    attachment(&format!("{folder}.zip"), APPLICATION_ZIP, content)
}

/// A 200 inline plain-text response carrying raw object bytes.
#[must_use]
pub fn inline_text(content: Bytes) -> Response<FacadeBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())
        .body(FacadeBody::from_bytes(content))
        .unwrap_or_else(|_| fallback_error())
}

/// A status-only response with a short plain-text body.
#[must_use]
pub fn status_text(status: StatusCode, message: &str) -> Response<FacadeBody> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())
        .body(FacadeBody::from_string(message))
        .unwrap_or_else(|_| fallback_error())
}

/// A 204 with no body.
#[must_use]
pub fn no_content() -> Response<FacadeBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(FacadeBody::empty())
        .unwrap_or_else(|_| fallback_error())
}

/// The 200 health payload.
#[must_use]
pub fn health(version: &str) -> Response<FacadeBody> {
    let payload = serde_json::json!({ "status": "running", "version": version });
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(FacadeBody::from_string(payload.to_string()))
        .unwrap_or_else(|_| fallback_error())
}

/// Map a store failure to the generic 500 the client is allowed to see.
///
/// Every [`StoreError`] variant collapses to the same short message; the
/// variant itself is logged by the caller, never serialized here.
#[must_use]
pub fn store_error(_err: &StoreError) -> Response<FacadeBody> {
    status_text(
        StatusCode::INTERNAL_SERVER_ERROR,
        "error talking to the object store",
    )
}

/// Last-resort response when a builder itself fails.
fn fallback_error() -> Response<FacadeBody> {
    let mut resp = Response::new(FacadeBody::from_string("internal error"));
    *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    resp
}
