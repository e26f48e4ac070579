// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cloud Storage client behavior against a mock JSON API.

use bytes::Bytes;
use folio_bucket::{GcsBucket, TokenSource};
use folio_core::{FolioError, ObjectStore, PluginAdapter};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn bucket_for(server: &MockServer, auth: TokenSource) -> GcsBucket {
    GcsBucket::new(
        "site.firebasestorage.app",
        &server.uri(),
        "https://storage.googleapis.com",
        auth,
    )
    .expect("client should build")
}

#[tokio::test]
async fn put_uploads_media_with_content_type_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/storage/v1/b/site.firebasestorage.app/o"))
        .and(query_param("uploadType", "media"))
        .and(query_param("name", "reels/1700000000000-clip.mp4"))
        .and(header("content-type", "video/mp4"))
        .and(header("authorization", "Bearer ya29.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let bucket = bucket_for(&server, TokenSource::Static("ya29.test".into())).await;
    bucket
        .put(
            "reels/1700000000000-clip.mp4",
            Bytes::from_static(b"\x00\x00\x00\x18ftypmp42"),
            "video/mp4",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn make_public_grants_all_users_reader() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/storage/v1/b/site.firebasestorage.app/o/webdesigns%2F1-home.png/acl",
        ))
        .and(body_json(
            serde_json::json!({ "entity": "allUsers", "role": "READER" }),
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let bucket = bucket_for(&server, TokenSource::Anonymous).await;
    bucket.make_public("webdesigns/1-home.png").await.unwrap();
}

#[tokio::test]
async fn upload_failure_surfaces_as_object_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let bucket = bucket_for(&server, TokenSource::Anonymous).await;
    let err = bucket
        .put("reels/1-a.mp4", Bytes::from_static(b"x"), "video/mp4")
        .await
        .unwrap_err();
    match err {
        FolioError::ObjectStore { message, .. } => assert!(message.contains("403")),
        other => panic!("expected ObjectStore error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_treats_missing_object_as_done() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/storage/v1/b/site.firebasestorage.app/o/reels%2F1-gone.mp4"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let bucket = bucket_for(&server, TokenSource::Anonymous).await;
    bucket.delete("reels/1-gone.mp4").await.unwrap();
}

#[tokio::test]
async fn delete_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let bucket = bucket_for(&server, TokenSource::Anonymous).await;
    assert!(bucket.delete("reels/1-a.mp4").await.is_err());
}

#[tokio::test]
async fn health_check_reflects_bucket_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/storage/v1/b/site.firebasestorage.app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "site.firebasestorage.app"
        })))
        .mount(&server)
        .await;

    let bucket = bucket_for(&server, TokenSource::Anonymous).await;
    assert!(bucket.health_check().await.unwrap().is_healthy());

    let missing = GcsBucket::new(
        "other",
        &server.uri(),
        "https://storage.googleapis.com",
        TokenSource::Anonymous,
    )
    .unwrap();
    assert!(!missing.health_check().await.unwrap().is_healthy());
}

#[tokio::test]
async fn public_url_uses_public_base_not_api_base() {
    let server = MockServer::start().await;
    let bucket = bucket_for(&server, TokenSource::Anonymous).await;
    let url = bucket.public_url("reels/1-a.mp4");
    assert_eq!(
        url,
        "https://storage.googleapis.com/site.firebasestorage.app/reels/1-a.mp4"
    );
    assert!(!url.starts_with(&server.uri()));
}
