//! End-to-end orchestration tests over the in-memory store and mock vendors

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use relica::assets::AssetCache;
use relica::orchestrator::{ArtifactService, GenerationSource};
use relica::registry::ProviderRegistry;
use relica::store::{MemoryRecordStore, RecordStore};
use relica::transport::{HttpTransport, TransportConfig};
use relica::types::{ArtifactRecord, JobState, ProviderCredential, ServiceName};

const IMAGE_DATA: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg==";

fn credential(service: ServiceName, key: &str) -> ProviderCredential {
    ProviderCredential {
        api_key: key.to_string(),
        is_active: true,
        ..ProviderCredential::new(service)
    }
}

async fn service_with(
    store: Arc<MemoryRecordStore>,
    server: &MockServer,
    cache_dir: &std::path::Path,
) -> ArtifactService {
    let registry = ProviderRegistry::new(store.clone())
        .with_base_url(ServiceName::OpenAi, server.uri())
        .with_base_url(ServiceName::Gemini, server.uri())
        .with_base_url(ServiceName::Grok, server.uri())
        .with_base_url(ServiceName::Meshy, server.uri());
    let transport = HttpTransport::with_config(TransportConfig {
        download_timeout: Duration::from_secs(5),
        ..TransportConfig::default()
    })
    .unwrap();
    let cache = AssetCache::with_transport(cache_dir, transport);
    ArtifactService::with_registry(registry, store, cache)
}

#[tokio::test]
async fn test_analyze_persists_result_to_the_artifact_record() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let store = Arc::new(MemoryRecordStore::new());
    store.seed_default_templates().await;
    store.put_credential(credential(ServiceName::Gemini, "AIza-live")).await;
    store.put_artifact(ArtifactRecord::new("art-1")).await;

    let analysis_text = json!({
        "type": "amphora",
        "period": "5th century BC",
        "culture": "Ancient Greek",
        "material": "terracotta",
        "purpose": "wine storage",
        "dimensions": { "height": 45.0, "baseWidth": 12.0, "topWidth": 18.5 },
        "shapeProfile": "convex",
        "condition": "fragmented",
        "restoration": "reassemble shards",
        "description": "Red-figure amphora"
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [ { "text": analysis_text } ], "role": "model" }, "finishReason": "STOP" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_with(store.clone(), &server, dir.path()).await;
    let analysis = service.analyze("art-1", IMAGE_DATA).await.unwrap();
    assert_eq!(analysis.artifact_type, "amphora");

    let artifact = store.find_artifact("art-1").await.unwrap().unwrap();
    assert_eq!(artifact.analysis_result.unwrap().artifact_type, "amphora");
}

#[tokio::test]
async fn test_analyze_with_no_provider_classifies_503() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let store = Arc::new(MemoryRecordStore::new());
    store.seed_default_templates().await;
    store.put_artifact(ArtifactRecord::new("art-1")).await;

    let service = service_with(store, &server, dir.path()).await;
    let err = service.analyze("art-1", IMAGE_DATA).await.unwrap_err();

    assert_eq!(err.status, 503);
    assert!(err.message.contains("OpenAI"));
}

#[tokio::test]
async fn test_analyze_with_missing_template_classifies_503() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let store = Arc::new(MemoryRecordStore::new());
    store.put_credential(credential(ServiceName::OpenAi, "sk-live")).await;
    store.put_artifact(ArtifactRecord::new("art-1")).await;

    let service = service_with(store, &server, dir.path()).await;
    let err = service.analyze("art-1", IMAGE_DATA).await.unwrap_err();

    assert_eq!(err.status, 503);
    assert!(err.message.contains("Prompt template"));
}

#[tokio::test]
async fn test_analyze_unknown_artifact_is_404() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let store = Arc::new(MemoryRecordStore::new());
    let service = service_with(store, &server, dir.path()).await;

    let err = service.analyze("ghost", IMAGE_DATA).await.unwrap_err();
    assert_eq!(err.status, 404);
}

#[tokio::test]
async fn test_restore_requires_a_stored_original_image() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let store = Arc::new(MemoryRecordStore::new());
    store.seed_default_templates().await;
    store.put_credential(credential(ServiceName::Grok, "xai-live")).await;
    store.put_artifact(ArtifactRecord::new("art-1")).await;

    let service = service_with(store, &server, dir.path()).await;
    let err = service.restore("art-1", "attic kylix").await.unwrap_err();

    assert_eq!(err.status, 404);
    assert!(err.message.contains("Original image URL"));
}

#[tokio::test]
async fn test_restore_persists_the_restored_url() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let store = Arc::new(MemoryRecordStore::new());
    store.seed_default_templates().await;
    store.put_credential(credential(ServiceName::Grok, "xai-live")).await;
    store
        .put_artifact(
            ArtifactRecord::new("art-1").with_original_image("https://uploads.example.com/o.png"),
        )
        .await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ { "url": "https://imgen.x.ai/restored.png" } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_with(store.clone(), &server, dir.path()).await;
    let restored = service.restore("art-1", "attic kylix").await.unwrap();
    assert_eq!(restored.image_url, "https://imgen.x.ai/restored.png");

    let artifact = store.find_artifact("art-1").await.unwrap().unwrap();
    assert_eq!(
        artifact.restored_image_url.as_deref(),
        Some("https://imgen.x.ai/restored.png")
    );
}

#[tokio::test]
async fn test_generate_3d_stores_task_id_and_pending_status() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let store = Arc::new(MemoryRecordStore::new());
    store.seed_default_templates().await;
    store.put_credential(credential(ServiceName::Meshy, "msy-live")).await;
    store.put_artifact(ArtifactRecord::new("art-1")).await;

    Mock::given(method("POST"))
        .and(path("/v2/text-to-3d"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "result": "task-77" })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_with(store.clone(), &server, dir.path()).await;
    let task_id = service
        .generate_3d("art-1", GenerationSource::Prompt("black-figure amphora".into()))
        .await
        .unwrap();
    assert_eq!(task_id, "task-77");

    let artifact = store.find_artifact("art-1").await.unwrap().unwrap();
    assert_eq!(artifact.generation_task_id.as_deref(), Some("task-77"));
    assert_eq!(artifact.generation_status, Some(JobState::Pending));
}

#[tokio::test]
async fn test_status_success_caches_assets_and_persists_local_urls() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let store = Arc::new(MemoryRecordStore::new());
    store.put_credential(credential(ServiceName::Meshy, "msy-live")).await;
    let mut artifact = ArtifactRecord::new("art-1");
    artifact.generation_task_id = Some("task-77".to_string());
    artifact.generation_status = Some(JobState::InProgress);
    store.put_artifact(artifact).await;

    Mock::given(method("GET"))
        .and(path("/v2/text-to-3d/task-77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "task-77",
            "status": "SUCCEEDED",
            "progress": 100,
            "model_urls": {
                "glb": format!("{}/files/model.glb", server.uri()),
                "fbx": format!("{}/files/model.fbx", server.uri())
            },
            "thumbnail_url": format!("{}/files/preview.png", server.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;
    for file in ["model.glb", "model.fbx", "preview.png"] {
        Mock::given(method("GET"))
            .and(path(format!("/files/{file}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bytes".as_slice()))
            .expect(1)
            .mount(&server)
            .await;
    }

    let service = service_with(store.clone(), &server, dir.path()).await;
    let status = service.check_generation_status("art-1").await.unwrap();

    assert_eq!(status.status, JobState::Succeeded);
    let urls = status.model_urls.unwrap();
    assert_eq!(urls.glb.as_deref(), Some("/api/models/art-1/model.glb"));
    assert_eq!(urls.fbx.as_deref(), Some("/api/models/art-1/model.fbx"));
    assert_eq!(urls.thumbnail.as_deref(), Some("/api/models/art-1/thumbnail.png"));

    let artifact = store.find_artifact("art-1").await.unwrap().unwrap();
    assert_eq!(artifact.generation_status, Some(JobState::Succeeded));
    assert_eq!(artifact.model_urls.unwrap().glb.as_deref(), Some("/api/models/art-1/model.glb"));
    assert!(dir.path().join("art-1/model.glb").exists());
}

#[tokio::test]
async fn test_status_success_degrades_to_remote_urls_when_caching_fails() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let store = Arc::new(MemoryRecordStore::new());
    store.put_credential(credential(ServiceName::Meshy, "msy-live")).await;
    let mut artifact = ArtifactRecord::new("art-1");
    artifact.generation_task_id = Some("task-88".to_string());
    store.put_artifact(artifact).await;

    let glb_url = format!("{}/files/gone.glb", server.uri());
    Mock::given(method("GET"))
        .and(path("/v2/text-to-3d/task-88"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "task-88",
            "status": "SUCCEEDED",
            "progress": 100,
            "model_urls": { "glb": glb_url }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/gone.glb"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = service_with(store.clone(), &server, dir.path()).await;
    // Cache failure must not fail the status check.
    let status = service.check_generation_status("art-1").await.unwrap();

    assert_eq!(status.status, JobState::Succeeded);
    assert_eq!(status.model_urls.unwrap().glb.as_deref(), Some(glb_url.as_str()));
}

#[tokio::test]
async fn test_status_without_a_job_is_404() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let store = Arc::new(MemoryRecordStore::new());
    store.put_credential(credential(ServiceName::Meshy, "msy-live")).await;
    store.put_artifact(ArtifactRecord::new("art-1")).await;

    let service = service_with(store, &server, dir.path()).await;
    let err = service.check_generation_status("art-1").await.unwrap_err();
    assert_eq!(err.status, 404);
}

#[tokio::test]
async fn test_image_derived_generation_round_trip() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let store = Arc::new(MemoryRecordStore::new());
    store.seed_default_templates().await;
    store.put_credential(credential(ServiceName::Meshy, "msy-live")).await;
    store.put_artifact(ArtifactRecord::new("art-1")).await;

    Mock::given(method("POST"))
        .and(path("/v1/image-to-3d"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "result": "task-img-5" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/image-to-3d/task-img-5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "task-img-5",
            "status": "IN_PROGRESS",
            "progress": 30
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_with(store.clone(), &server, dir.path()).await;
    let task_id = service
        .generate_3d(
            "art-1",
            GenerationSource::Image("https://uploads.example.com/artifact.png".into()),
        )
        .await
        .unwrap();
    assert_eq!(task_id, "img:task-img-5");

    // The stored marker routes the status check to the image namespace.
    let status = service.check_generation_status("art-1").await.unwrap();
    assert_eq!(status.status, JobState::InProgress);
    assert_eq!(status.progress, Some(30));
}
