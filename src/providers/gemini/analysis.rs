//! Gemini analysis capability implementation

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::json;

use super::client::GeminiClient;
use super::types::GenerateContentResponse;
use super::utils;
use crate::defaults;
use crate::error::AiError;
use crate::traits::AnalysisCapability;
use crate::types::AnalysisResult;
use crate::utils::data_url;

#[async_trait]
impl AnalysisCapability for GeminiClient {
    async fn analyze(
        &self,
        image_data: &str,
        prompt_template: &str,
    ) -> Result<AnalysisResult, AiError> {
        let image = data_url::parse(image_data)?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model(),
            self.api_key.expose_secret(),
        );
        let body = json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt_template },
                        {
                            "inline_data": {
                                "mime_type": image.mime_type,
                                "data": image.data,
                            },
                        },
                    ],
                },
            ],
            "generationConfig": {
                "temperature": self.options.temperature.unwrap_or(defaults::gemini::TEMPERATURE),
                "maxOutputTokens": self.options.max_tokens.unwrap_or(defaults::gemini::MAX_TOKENS),
                "responseMimeType": "application/json",
            },
        });

        let response = self.retry.execute(|| self.post_json(&url, &body)).await?;

        if let Some(envelope) = response.body.get("error") {
            return Err(utils::map_gemini_error(envelope, response.status));
        }
        if !response.ok {
            return Err(AiError::api(
                response.status,
                format!("Gemini API error: {}", response.status),
            ));
        }

        let parsed: GenerateContentResponse = serde_json::from_value(response.body)
            .map_err(|e| AiError::ParseError(format!("Unexpected Gemini response shape: {e}")))?;
        let text = parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .and_then(|part| part.text.as_deref())
            .ok_or_else(|| AiError::ProviderError {
                provider: "gemini".to_string(),
                message: "Empty response from Gemini".to_string(),
                error_code: None,
            })?;

        serde_json::from_str(text)
            .map_err(|e| AiError::ParseError(format!("Analysis is not valid JSON: {e}")))
    }
}
