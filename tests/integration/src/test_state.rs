//! End-to-end tests for the Terraform state endpoints.

use crate::{ensure_bucket, facade_url, put_object, store_client};

const STATE_BUCKET: &str = "tf-state";
const STATE_KEY: &str = "terraform.tfstate";

#[tokio::test]
#[ignore]
async fn test_should_serve_terraform_state() {
    let client = store_client();
    ensure_bucket(&client, STATE_BUCKET).await;
    put_object(&client, STATE_BUCKET, STATE_KEY, b"{\"version\": 4}").await;

    let url = format!("{}/terraform-state", facade_url());
    let resp = reqwest::get(&url).await.expect("request");

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-disposition"].to_str().expect("header"),
        "attachment; filename=terraform.tfstate"
    );
    assert_eq!(resp.bytes().await.expect("body").as_ref(), b"{\"version\": 4}");
}

#[tokio::test]
#[ignore]
async fn test_should_accept_state_upload_and_serve_it_back() {
    let client = store_client();
    ensure_bucket(&client, STATE_BUCKET).await;

    let url = format!("{}/terraform-state", facade_url());
    let resp = reqwest::Client::new()
        .put(&url)
        .body(&b"{\"version\": 5}"[..])
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 204);

    let resp = reqwest::get(&url).await.expect("request");
    assert_eq!(resp.bytes().await.expect("body").as_ref(), b"{\"version\": 5}");
}

#[tokio::test]
#[ignore]
async fn test_should_reject_delete_on_terraform_state() {
    let url = format!("{}/terraform-state", facade_url());
    let resp = reqwest::Client::new()
        .delete(&url)
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 405);
}
