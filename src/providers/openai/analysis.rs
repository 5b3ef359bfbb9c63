//! OpenAI analysis capability implementation

use async_trait::async_trait;
use serde_json::json;

use super::client::OpenAiClient;
use super::types::ChatCompletionResponse;
use super::utils;
use crate::error::AiError;
use crate::traits::AnalysisCapability;
use crate::types::AnalysisResult;
use crate::utils::data_url;

#[async_trait]
impl AnalysisCapability for OpenAiClient {
    async fn analyze(
        &self,
        image_data: &str,
        prompt_template: &str,
    ) -> Result<AnalysisResult, AiError> {
        // Reject malformed uploads before spending a network call.
        data_url::parse(image_data)?;

        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model(),
            "messages": [
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt_template },
                        { "type": "image_url", "image_url": { "url": image_data, "detail": "high" } },
                    ],
                },
            ],
            "max_tokens": self.max_tokens(),
            "temperature": self.temperature(),
            "response_format": { "type": "json_object" },
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
        let text = completion
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| AiError::ParseError("OpenAI returned no choices".to_string()))?;

        serde_json::from_str(text)
            .map_err(|e| AiError::ParseError(format!("Analysis is not valid JSON: {e}")))
    }
}
