//! AWS SDK backed object store.
//!
//! [`S3Store`] wraps one `aws_sdk_s3::Client` built from a [`StoreConfig`]:
//! static credentials, explicit endpoint URL, forced path-style addressing
//! (MinIO requires it), and a bounded per-operation timeout. The client is
//! constructed once and reused; the SDK pools connections underneath.
//!
//! Error mapping: dispatch failures and timeouts become
//! [`StoreError::Unavailable`], a missing key becomes
//! [`StoreError::NotFound`], everything else maps to the operation-specific
//! variant.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_smithy_types::timeout::TimeoutConfig;
use bytes::Bytes;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::store::{ObjectKey, ObjectStore};

/// Object store client backed by the AWS S3 SDK.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    /// Build a client from the given connection settings.
    ///
    /// The configuration is consumed; it is immutable for the lifetime of
    /// the store.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "bucketgate",
        );

        let timeouts = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(config.operation_timeout_secs))
            .build();

        let sdk_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(config.endpoint_url())
            .force_path_style(config.force_path_style)
            .timeout_config(timeouts)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(sdk_config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_by_prefix(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectKey>, StoreError> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut req = self.client.list_objects_v2().bucket(bucket).prefix(prefix);
            if let Some(token) = continuation_token.take() {
                req = req.continuation_token(token);
            }

            let resp = req.send().await.map_err(|err| {
                if is_connection_failure(&err) {
                    StoreError::unavailable(describe(&err))
                } else {
                    StoreError::List {
                        bucket: bucket.to_owned(),
                        message: describe(&err),
                    }
                }
            })?;

            for obj in resp.contents() {
                if let Some(key) = obj.key() {
                    keys.push(key.to_owned());
                }
            }

            if resp.is_truncated() == Some(true) {
                continuation_token = resp.next_continuation_token().map(ToOwned::to_owned);
                if continuation_token.is_none() {
                    break;
                }
            } else {
                break;
            }
        }

        debug!(bucket = %bucket, prefix = %prefix, count = keys.len(), "listed objects");
        Ok(keys)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(GetObjectError::is_no_such_key)
                {
                    StoreError::NotFound {
                        key: key.to_owned(),
                    }
                } else if is_connection_failure(&err) {
                    StoreError::unavailable(describe(&err))
                } else {
                    StoreError::Fetch {
                        key: key.to_owned(),
                        message: describe(&err),
                    }
                }
            })?;

        // Collecting the body consumes the response; the underlying
        // connection is released on every exit path by ownership.
        let data = output.body.collect().await.map_err(|err| StoreError::Fetch {
            key: key.to_owned(),
            message: err.to_string(),
        })?;

        Ok(data.into_bytes())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content: Bytes,
    ) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(content))
            .send()
            .await
            .map_err(|err| {
                if is_connection_failure(&err) {
                    StoreError::unavailable(describe(&err))
                } else {
                    StoreError::Put {
                        key: key.to_owned(),
                        message: describe(&err),
                    }
                }
            })?;

        debug!(bucket = %bucket, key = %key, "stored object");
        Ok(())
    }
}

/// Whether an SDK error means the store could not be reached at all
/// (connection failure or timeout), as opposed to a store-side rejection.
fn is_connection_failure<E, R>(err: &SdkError<E, R>) -> bool {
    matches!(
        err,
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)
    )
}

/// Render the full error chain of an SDK error for server-side logs.
fn describe<E, R>(err: &SdkError<E, R>) -> String
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    format!(
        "{}",
        aws_smithy_types::error::display::DisplayErrorContext(err)
    )
}
