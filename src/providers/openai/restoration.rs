//! OpenAI restoration capability implementation
//!
//! Image generation models accept only text prompts, so restoration runs in
//! two stages: a vision-capable chat model first describes the specific
//! artifact from its original photograph, and that grounded description is
//! then handed to the image model. Stage two must not begin until stage one
//! completes.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::client::OpenAiClient;
use super::types::{ChatCompletionResponse, ImageGenerationResponse};
use super::utils;
use crate::defaults;
use crate::error::AiError;
use crate::traits::ImageRestorationCapability;
use crate::types::RestoredImage;

#[async_trait]
impl ImageRestorationCapability for OpenAiClient {
    async fn restore(
        &self,
        prompt: &str,
        prompt_template: &str,
        original_image_url: Option<&str>,
    ) -> Result<RestoredImage, AiError> {
        let image_url = original_image_url.ok_or_else(|| {
            AiError::InvalidInput(
                "Original image URL is required for restoration. Analyze the image first or provide the URL."
                    .to_string(),
            )
        })?;

        let description = self.describe_restored(prompt, prompt_template, image_url).await?;
        debug!(prompt = %description, "image generation prompt");
        self.generate_image(&description).await
    }
}

impl OpenAiClient {
    /// Stage one: ground the generation in the artifact's visual details.
    async fn describe_restored(
        &self,
        prompt: &str,
        prompt_template: &str,
        image_url: &str,
    ) -> Result<String, AiError> {
        let template_context = prompt_template.replace("{{prompt}}", "");
        let brief = format!(
            "Based on the artifact shown in the reference image, create a RESTORED version with these specifications:\n\
             \n\
             Artifact description: {prompt}\n\
             \n\
             Requirements:\n\
             - Maintain the EXACT same shape, proportions, and style as the original artifact\n\
             - Preserve all decorative patterns and design elements\n\
             - Show it in PERFECT restored condition (no cracks, chips, or damage)\n\
             - Place ONLY the artifact on a pure solid white background (#FFFFFF)\n\
             - No other objects, no hands, no people, no shadows\n\
             - Professional museum product photography\n\
             - Centered composition, well-lit, high detail\n\
             - The artifact should look identical to the original but completely restored\n\
             \n\
             Additional context from template: {template_context}"
        );

        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model(),
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "text",
                            "text": format!(
                                "Look at this artifact image carefully and create a detailed description for an image model to generate a perfectly restored version. {brief}"
                            ),
                        },
                        { "type": "image_url", "image_url": { "url": image_url, "detail": "high" } },
                    ],
                },
            ],
            "max_tokens": defaults::openai::DESCRIPTION_MAX_TOKENS,
            "temperature": self.temperature(),
        });

        let response = self.retry.execute(|| self.post_json(&url, &body)).await?;

        if !response.ok || response.body.get("error").is_some() {
            let message = utils::extract_error_message(&response.body)
                .unwrap_or_else(|| format!("OpenAI API error: {}", response.status));
            return Err(AiError::ApiError {
                code: response.status,
                message,
                details: response.body.get("error").cloned(),
            });
        }

        let completion: ChatCompletionResponse = serde_json::from_value(response.body)
            .map_err(|e| AiError::ParseError(format!("Unexpected OpenAI response shape: {e}")))?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AiError::ParseError("OpenAI returned no choices".to_string()))
    }

    /// Stage two: generate the restored rendition from the grounded description.
    async fn generate_image(&self, description: &str) -> Result<RestoredImage, AiError> {
        let url = format!("{}/images/generations", self.base_url);
        let body = json!({
            "model": defaults::openai::IMAGE_MODEL,
            "prompt": format!(
                "{description}\n\
                 \n\
                 CRITICAL REQUIREMENTS:\n\
                 - Pure white background ONLY (#FFFFFF)\n\
                 - NO other objects in frame\n\
                 - NO hands, NO people\n\
                 - Isolated artifact centered\n\
                 - Professional product photography\n\
                 - High quality museum documentation style"
            ),
            "n": 1,
            "size": self.options.image_size.as_deref().unwrap_or(defaults::openai::IMAGE_SIZE),
            "quality": self.options.image_quality.as_deref().unwrap_or(defaults::openai::IMAGE_QUALITY),
        });

        let response = self.retry.execute(|| self.post_json(&url, &body)).await?;

        if !response.ok || response.body.get("error").is_some() {
            let message = utils::extract_error_message(&response.body)
                .unwrap_or_else(|| format!("OpenAI image error: {}", response.status));
            return Err(AiError::ApiError {
                code: response.status,
                message,
                details: response.body.get("error").cloned(),
            });
        }

        let generated: ImageGenerationResponse = serde_json::from_value(response.body)
            .map_err(|e| AiError::ParseError(format!("Unexpected OpenAI image response shape: {e}")))?;
        let image = generated
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AiError::ParseError("OpenAI image response contained no images".to_string()))?;

        let image_url = image
            .url
            .ok_or_else(|| AiError::ParseError("OpenAI image response contained no URL".to_string()))?;

        Ok(RestoredImage {
            image_url,
            revised_prompt: image.revised_prompt,
        })
    }
}
