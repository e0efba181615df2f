//! End-to-end tests for the single-file endpoint.

use crate::{cleanup_prefix, ensure_bucket, facade_url, put_object, store_client, test_prefix};

const FILE_BUCKET: &str = "vm-files";

#[tokio::test]
#[ignore]
async fn test_should_serve_file_inline() {
    let client = store_client();
    ensure_bucket(&client, FILE_BUCKET).await;

    let prefix = test_prefix("inline");
    let key = format!("{prefix}notes.txt");
    put_object(&client, FILE_BUCKET, &key, b"plain notes").await;

    let url = format!("{}/?file={key}", facade_url());
    let resp = reqwest::get(&url).await.expect("request");

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-type"].to_str().expect("header"),
        "text/plain"
    );
    assert_eq!(resp.bytes().await.expect("body").as_ref(), b"plain notes");

    cleanup_prefix(&client, FILE_BUCKET, &prefix).await;
}

#[tokio::test]
#[ignore]
async fn test_should_serve_file_as_attachment_on_download() {
    let client = store_client();
    ensure_bucket(&client, FILE_BUCKET).await;

    let prefix = test_prefix("download");
    let key = format!("{prefix}disk.img");
    put_object(&client, FILE_BUCKET, &key, b"binary-ish").await;

    let url = format!("{}/?file={key}&download=true", facade_url());
    let resp = reqwest::get(&url).await.expect("request");

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-type"].to_str().expect("header"),
        "application/octet-stream"
    );
    assert_eq!(
        resp.headers()["content-disposition"].to_str().expect("header"),
        format!("attachment; filename={key}")
    );

    cleanup_prefix(&client, FILE_BUCKET, &prefix).await;
}

#[tokio::test]
#[ignore]
async fn test_should_reject_missing_file_param() {
    let url = format!("{}/", facade_url());
    let resp = reqwest::get(&url).await.expect("request");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_should_return_500_for_missing_object() {
    let url = format!("{}/?file=definitely-not-there.txt", facade_url());
    let resp = reqwest::get(&url).await.expect("request");
    assert_eq!(resp.status(), 500);
}
