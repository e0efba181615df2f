//! End-to-end tests for the folder-archive endpoint.

use std::io::Read;

use crate::{cleanup_prefix, ensure_bucket, facade_url, put_object, store_client, test_prefix};

const TEMPLATE_BUCKET: &str = "vm-templates";

/// Decode a response body as a ZIP archive into (name, content) pairs.
fn decode_zip(body: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive =
        zip::ZipArchive::new(std::io::Cursor::new(body.to_vec())).expect("valid zip archive");
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).expect("entry readable");
        let mut content = Vec::new();
        file.read_to_end(&mut content).expect("entry content");
        entries.push((file.name().to_owned(), content));
    }
    entries
}

#[tokio::test]
#[ignore]
async fn test_should_download_folder_as_zip() {
    let client = store_client();
    ensure_bucket(&client, TEMPLATE_BUCKET).await;

    let prefix = test_prefix("zip");
    put_object(&client, TEMPLATE_BUCKET, &format!("{prefix}a.txt"), b"hello").await;
    put_object(&client, TEMPLATE_BUCKET, &format!("{prefix}b.txt"), b"world").await;

    let url = format!("{}/template-content?folder={prefix}", facade_url());
    let resp = reqwest::get(&url).await.expect("request");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-disposition"].to_str().expect("header"),
        format!("attachment; filename={prefix}.zip")
    );

    let body = resp.bytes().await.expect("body");
    let mut entries = decode_zip(&body);
    entries.sort();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], ("a.txt".to_owned(), b"hello".to_vec()));
    assert_eq!(entries[1], ("b.txt".to_owned(), b"world".to_vec()));

    cleanup_prefix(&client, TEMPLATE_BUCKET, &prefix).await;
}

#[tokio::test]
#[ignore]
async fn test_should_download_empty_zip_for_unmatched_folder() {
    let client = store_client();
    ensure_bucket(&client, TEMPLATE_BUCKET).await;

    let prefix = test_prefix("empty");
    let url = format!("{}/template-content?folder={prefix}", facade_url());
    let resp = reqwest::get(&url).await.expect("request");
    assert_eq!(resp.status(), 200);

    let body = resp.bytes().await.expect("body");
    assert!(decode_zip(&body).is_empty());
}

#[tokio::test]
#[ignore]
async fn test_should_reject_post_on_template_content() {
    let url = format!("{}/template-content?folder=whatever/", facade_url());
    let resp = reqwest::Client::new()
        .post(&url)
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 405);
}
