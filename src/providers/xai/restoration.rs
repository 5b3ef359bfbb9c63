//! xAI restoration capability implementation

use async_trait::async_trait;
use serde_json::json;

use super::client::XaiClient;
use super::types::ImageGenerationResponse;
use super::utils;
use crate::error::AiError;
use crate::traits::ImageRestorationCapability;
use crate::types::RestoredImage;

#[async_trait]
impl ImageRestorationCapability for XaiClient {
    async fn restore(
        &self,
        prompt: &str,
        prompt_template: &str,
        _original_image_url: Option<&str>,
    ) -> Result<RestoredImage, AiError> {
        let final_prompt = prompt_template.replace("{{prompt}}", prompt);

        let url = format!("{}/images/generations", self.base_url);
        let body = json!({
            "model": self.image_model(),
            "prompt": final_prompt,
            "n": 1,
        });

        let response = self.retry.execute(|| self.post_json(&url, &body)).await?;

        if !response.ok || response.body.get("error").is_some() {
            let message = utils::extract_error_message(&response.body)
                .unwrap_or_else(|| format!("Grok image generation error: {}", response.status));
            return Err(AiError::ApiError {
                code: response.status,
                message,
                details: response.body.get("error").cloned(),
            });
        }

        let generated: ImageGenerationResponse = serde_json::from_value(response.body)
            .map_err(|e| AiError::ParseError(format!("Unexpected Grok image response shape: {e}")))?;
        let image = generated
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AiError::ParseError("Grok image response contained no images".to_string()))?;

        // The result arrives as a remote URL or inline base64; normalize both
        // into a URL-shaped string.
        let image_url = match (image.url, image.b64_json) {
            (Some(url), _) => url,
            (None, Some(b64)) => format!("data:image/png;base64,{b64}"),
            (None, None) => {
                return Err(AiError::ParseError(
                    "Grok image response contained no image payload".to_string(),
                ));
            }
        };

        Ok(RestoredImage {
            image_url,
            revised_prompt: None,
        })
    }
}
