//! Meshy model generation capability implementation

use async_trait::async_trait;
use serde_json::json;

use super::client::MeshyClient;
use super::types::{CreateTaskResponse, TaskStatusResponse};
use super::{IMAGE_TASK_PREFIX, utils};
use crate::error::AiError;
use crate::traits::ModelGenerationCapability;
use crate::transport::HttpResponse;
use crate::types::{GenerationStatus, GenerationTicket, JobState, ModelUrls};

#[async_trait]
impl ModelGenerationCapability for MeshyClient {
    async fn generate(
        &self,
        prompt: &str,
        prompt_template: &str,
    ) -> Result<GenerationTicket, AiError> {
        let final_prompt = prompt_template.replace("{{prompt}}", prompt);

        let url = format!("{}/v2/text-to-3d", self.base_url);
        let body = json!({
            "mode": "preview",
            "prompt": final_prompt,
            "art_style": self.art_style(),
            "negative_prompt": self.negative_prompt(),
        });

        let response = self.retry.execute(|| self.post_json(&url, &body)).await?;
        let created: CreateTaskResponse = self.read_body(response)?;

        Ok(GenerationTicket {
            task_id: created.result,
        })
    }

    async fn generate_from_image(&self, image_url: &str) -> Result<GenerationTicket, AiError> {
        let url = format!("{}/v1/image-to-3d", self.base_url);
        let body = json!({
            "image_url": image_url,
            "enable_pbr": true,
        });

        let response = self.retry.execute(|| self.post_json(&url, &body)).await?;
        let created: CreateTaskResponse = self.read_body(response)?;

        // Image-derived jobs live in a separate namespace; tag the id so a
        // later status check queries the right sub-endpoint.
        Ok(GenerationTicket {
            task_id: format!("{IMAGE_TASK_PREFIX}{}", created.result),
        })
    }

    async fn check_status(&self, task_id: &str) -> Result<GenerationStatus, AiError> {
        let (endpoint, real_id) = match task_id.strip_prefix(IMAGE_TASK_PREFIX) {
            Some(stripped) => ("v1/image-to-3d", stripped),
            None => ("v2/text-to-3d", task_id),
        };

        let url = format!("{}/{endpoint}/{real_id}", self.base_url);
        let response = self.retry.execute(|| self.get_json(&url)).await?;
        let task: TaskStatusResponse = self.read_body(response)?;

        let status = utils::parse_job_state(&task.status)?;
        let model_urls = if status == JobState::Succeeded {
            let urls = task.model_urls.unwrap_or_default();
            Some(ModelUrls {
                glb: urls.glb,
                fbx: urls.fbx,
                thumbnail: task.thumbnail_url,
            })
        } else {
            None
        };

        Ok(GenerationStatus {
            status,
            model_urls,
            progress: task.progress,
        })
    }
}

impl MeshyClient {
    /// Check the vendor error envelope, then deserialize the body.
    fn read_body<T: serde::de::DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<T, AiError> {
        if !response.ok {
            let message = utils::extract_error_message(&response.body)
                .unwrap_or_else(|| format!("Meshy API error: {}", response.status));
            return Err(AiError::ApiError {
                code: response.status,
                message,
                details: Some(response.body),
            });
        }

        serde_json::from_value(response.body)
            .map_err(|e| AiError::ParseError(format!("Unexpected Meshy response shape: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_task_prefix_round_trip() {
        let tagged = format!("{IMAGE_TASK_PREFIX}abc-123");
        assert_eq!(tagged.strip_prefix(IMAGE_TASK_PREFIX), Some("abc-123"));
        assert_eq!("abc-123".strip_prefix(IMAGE_TASK_PREFIX), None);
    }
}
