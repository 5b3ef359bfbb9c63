//! Mock API tests for the xAI Grok adapter
//!
//! Grok's chat and image APIs are OpenAI-shaped:
//! <https://docs.x.ai/docs/api-reference>

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use relica::providers::xai::{XaiClient, XaiOptions};
use relica::traits::{AnalysisCapability, ImageRestorationCapability};
use relica::{AiError, RetryPolicy, classify};

const IMAGE_DATA: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg==";

fn chat_completion_response(content: String) -> serde_json::Value {
    json!({
        "id": "b2b8f placeholder",
        "object": "chat.completion",
        "model": "grok-2-vision-latest",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

fn client(server: &MockServer) -> XaiClient {
    XaiClient::new("xai-test", XaiOptions::default())
        .unwrap()
        .with_base_url(server.uri())
        .with_retry_policy(
            RetryPolicy::new()
                .with_retries(1)
                .with_delay(Duration::from_millis(1)),
        )
}

#[tokio::test]
async fn test_analyze_recovers_json_from_prose() {
    let server = MockServer::start().await;

    // Grok has no JSON output mode; the reply wraps the object in prose.
    let reply = format!(
        "Here is my analysis of the artifact:\n\n{}\n\nLet me know if you need more detail.",
        json!({
            "type": "kylix",
            "period": "Classical",
            "culture": "Attic",
            "material": "ceramic",
            "purpose": "drinking cup",
            "dimensions": { "height": 9.0, "baseWidth": 8.0, "topWidth": 20.0 },
            "shapeProfile": "concave",
            "condition": "repaired from fragments",
            "restoration": "stabilize old adhesive joins",
            "description": "Two-handled drinking cup with eye motif"
        })
    );

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer xai-test"))
        .and(body_partial_json(json!({ "model": "grok-2-vision-latest" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_response(reply)))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).analyze(IMAGE_DATA, "Analyze this artifact.").await.unwrap();
    assert_eq!(result.artifact_type, "kylix");
    assert_eq!(result.dimensions.top_width, 20.0);
}

#[tokio::test]
async fn test_analyze_rejects_malformed_image_before_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).analyze("bare-base64-payload", "Analyze.").await.unwrap_err();
    assert!(matches!(err, AiError::InvalidInput(_)));
}

#[tokio::test]
async fn test_analyze_without_json_in_reply_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_response(
            "I see a ceramic vessel, probably Greek.".to_string(),
        )))
        .mount(&server)
        .await;

    let err = client(&server).analyze(IMAGE_DATA, "Analyze.").await.unwrap_err();
    assert!(err.to_string().contains("Failed to parse Grok response"));
    assert_eq!(classify(&err).status, 502);
}

#[tokio::test]
async fn test_restore_with_remote_url_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_partial_json(json!({
            "model": "grok-2-image",
            "prompt": "Professional archaeological restoration: attic kylix, white background",
            "n": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ { "url": "https://imgen.x.ai/xai-imgen/restored.png" } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let restored = client(&server)
        .restore(
            "attic kylix",
            "Professional archaeological restoration: {{prompt}}, white background",
            None,
        )
        .await
        .unwrap();

    assert_eq!(restored.image_url, "https://imgen.x.ai/xai-imgen/restored.png");
}

#[tokio::test]
async fn test_restore_normalizes_base64_result_to_data_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ { "b64_json": "aW1hZ2UtYnl0ZXM=" } ]
        })))
        .mount(&server)
        .await;

    let restored = client(&server).restore("vase", "{{prompt}}", None).await.unwrap();
    assert_eq!(restored.image_url, "data:image/png;base64,aW1hZ2UtYnl0ZXM=");
}

#[tokio::test]
async fn test_credits_error_via_top_level_code_classifies_403() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {},
            "code": "The credits of team 7c8e are insufficient"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).restore("vase", "{{prompt}}", None).await.unwrap_err();
    assert!(err.to_string().contains("credits"));
    assert_eq!(classify(&err).status, 403);
}
