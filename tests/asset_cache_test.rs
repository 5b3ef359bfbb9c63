//! Asset cache integration tests

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use relica::AiError;
use relica::assets::AssetCache;

const GLB_BYTES: &[u8] = b"glTF\x02\x00\x00\x00binary-mesh-payload";

#[tokio::test]
async fn test_cache_downloads_once_and_is_idempotent() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/files/model.glb"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(GLB_BYTES))
        .expect(1) // the second cache call must not re-download
        .mount(&server)
        .await;

    let cache = AssetCache::new(dir.path()).unwrap();
    let remote = format!("{}/files/model.glb", server.uri());

    let first = cache.cache("art-1", &remote, "model.glb").await.unwrap();
    let second = cache.cache("art-1", &remote, "model.glb").await.unwrap();

    assert_eq!(first, "/api/models/art-1/model.glb");
    assert_eq!(first, second);

    let stored = std::fs::read(dir.path().join("art-1/model.glb")).unwrap();
    assert_eq!(stored, GLB_BYTES);
}

#[tokio::test]
async fn test_cache_follows_redirects() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/expired/thumbnail.png"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/fresh/thumbnail.png", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fresh/thumbnail.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png-bytes".as_slice()))
        .mount(&server)
        .await;

    let cache = AssetCache::new(dir.path()).unwrap();
    let remote = format!("{}/expired/thumbnail.png", server.uri());
    let public = cache.cache("art-2", &remote, "thumbnail.png").await.unwrap();

    assert_eq!(public, "/api/models/art-2/thumbnail.png");
    assert_eq!(
        std::fs::read(dir.path().join("art-2/thumbnail.png")).unwrap(),
        b"png-bytes"
    );
}

#[tokio::test]
async fn test_failed_download_surfaces_an_error_and_writes_nothing() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/files/missing.glb"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cache = AssetCache::new(dir.path()).unwrap();
    let remote = format!("{}/files/missing.glb", server.uri());
    let err = cache.cache("art-3", &remote, "model.glb").await.unwrap_err();

    assert!(err.to_string().contains("Download failed: HTTP 404"));
    assert!(!dir.path().join("art-3/model.glb").exists());
}

#[tokio::test]
async fn test_traversal_in_identifiers_is_rejected_before_any_io() {
    let dir = tempfile::tempdir().unwrap();
    let cache = AssetCache::new(dir.path()).unwrap();

    for (artifact_id, filename) in [
        ("../escape", "model.glb"),
        ("art-1", "../secret"),
        ("art-1", "a/../b"),
        ("art/1", "model.glb"),
    ] {
        let err = cache
            .cache(artifact_id, "https://assets.meshy.ai/m.glb", filename)
            .await
            .unwrap_err();
        assert!(
            matches!(err, AiError::InvalidInput(_)),
            "accepted ({artifact_id}, {filename})"
        );
    }
}
