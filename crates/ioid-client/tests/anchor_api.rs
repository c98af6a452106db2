//! Storage gateway behavior against a mock HTTP server.

use ioid_client::IpfsClient;
use ioid_core::IoidError;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn upload_returns_the_cid() {
    let server = MockServer::start().await;
    let doc = serde_json::json!({ "id": "did:io:0xabcdefabcdefabcdefabcdefabcdefabcdefabcd" });
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_partial_json(serde_json::json!({ "data": doc, "type": "ipfs" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cid": "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cid = IpfsClient::new(server.uri()).upload(&doc).await.unwrap();
    assert_eq!(cid, "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");
}

#[tokio::test]
async fn identical_content_yields_identical_locator() {
    // A content-addressed backend answers by content, not by call; uploading
    // twice must hand back the same locator both times.
    let server = MockServer::start().await;
    let doc = serde_json::json!({ "id": "did:io:0xabcdefabcdefabcdefabcdefabcdefabcdefabcd" });
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_partial_json(serde_json::json!({ "data": doc })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cid": "QmSameContentSameCid",
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = IpfsClient::new(server.uri());
    let first = client.upload(&doc).await.unwrap();
    let second = client.upload(&doc).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_cid_field_is_anchor_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    let err = IpfsClient::new(server.uri())
        .upload(&serde_json::json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, IoidError::AnchorRejected(_)));
}

#[tokio::test]
async fn transport_failure_is_anchor_unavailable() {
    let err = IpfsClient::new("http://127.0.0.1:1")
        .upload(&serde_json::json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, IoidError::AnchorUnavailable(_)));
}
