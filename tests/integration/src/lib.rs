//! Integration tests for the BucketGate server.
//!
//! These tests require a running BucketGate server at `localhost:8080`
//! backed by a MinIO (or other S3-compatible) store at `localhost:9000`.
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p bucketgate-integration -- --ignored
//! ```

use std::sync::Once;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the object store the server is configured against.
fn store_endpoint_url() -> String {
    std::env::var("STORE_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:9000".to_owned())
}

/// Base URL for the BucketGate server under test.
#[must_use]
pub fn facade_url() -> String {
    std::env::var("BUCKETGATE_URL").unwrap_or_else(|_| "http://localhost:8080".to_owned())
}

/// Create a configured S3 client pointing at the backing store, for seeding
/// and cleaning up test objects.
#[must_use]
pub fn store_client() -> aws_sdk_s3::Client {
    init_tracing();

    let access_key = std::env::var("ACCESS_KEY_ID").unwrap_or_else(|_| "minioadmin".to_owned());
    let secret_key =
        std::env::var("SECRET_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_owned());
    let creds = Credentials::new(access_key, secret_key, None, None, "integration-test");

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(creds)
        .endpoint_url(store_endpoint_url())
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// Generate a unique key prefix for a test.
#[must_use]
pub fn test_prefix(name: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("it-{name}-{id}/")
}

/// Ensure a bucket exists (MinIO reports it as already owned otherwise).
pub async fn ensure_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
    let _ = client.create_bucket().bucket(bucket).send().await;
}

/// Seed one object.
pub async fn put_object(client: &aws_sdk_s3::Client, bucket: &str, key: &str, content: &[u8]) {
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(aws_sdk_s3::primitives::ByteStream::from(content.to_vec()))
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to seed {bucket}/{key}: {e}"));
}

/// Delete every object under a prefix.
pub async fn cleanup_prefix(client: &aws_sdk_s3::Client, bucket: &str, prefix: &str) {
    let mut continuation_token = None;
    loop {
        let mut req = client.list_objects_v2().bucket(bucket).prefix(prefix);
        if let Some(token) = continuation_token.take() {
            req = req.continuation_token(token);
        }
        let Ok(resp) = req.send().await else {
            return;
        };

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                let _ = client.delete_object().bucket(bucket).key(key).send().await;
            }
        }

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(ToOwned::to_owned);
        } else {
            break;
        }
    }
}

mod test_archive;
mod test_file;
mod test_state;
