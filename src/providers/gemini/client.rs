use crate::core::error::AdvisorError;
use crate::providers::base_client::HttpClient;
use crate::providers::gemini::types::*;
use crate::providers::{GenerationOptions, Role, Turn};
use std::collections::HashMap;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
    pub model: String,
    client: HttpClient,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, AdvisorError> {
        // Sent as a header so the key stays out of request URLs
        let headers = HashMap::from([(API_KEY_HEADER.to_string(), api_key)]);
        let client = HttpClient::new(base_url, timeout, Some(headers))?;

        Ok(Self { client, model })
    }

    pub async fn generate_content(
        &self,
        turns: &[Turn],
        options: &GenerationOptions,
    ) -> Result<String, AdvisorError> {
        let payload = build_payload(turns, options);
        tracing::debug!(
            model = %self.model,
            turns = turns.len(),
            structured = options.response_schema.is_some(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(
                &format!("v1beta/models/{}:generateContent", self.model),
                &payload,
            )
            .await?;

        let response_body: String = response.text().await?;
        let parsed: GeminiResponse = serde_json::from_str(&response_body).map_err(|e| {
            AdvisorError::Serialization(format!("Failed to parse Gemini response: {}", e))
        })?;

        extract_text(parsed)
    }
}

fn build_payload(turns: &[Turn], options: &GenerationOptions) -> GeminiRequest {
    let contents = turns
        .iter()
        .map(|turn| GeminiContent {
            role: Some(
                match turn.role {
                    Role::User => "user",
                    Role::Model => "model",
                }
                .to_string(),
            ),
            parts: vec![GeminiPart {
                text: turn.text.clone(),
            }],
        })
        .collect();

    let system_instruction = (!options.system_instruction.is_empty()).then(|| GeminiContent {
        role: None,
        parts: vec![GeminiPart {
            text: options.system_instruction.clone(),
        }],
    });

    let generation_config = GenerationConfig {
        temperature: options.temperature,
        response_mime_type: options
            .response_schema
            .as_ref()
            .map(|_| "application/json".to_string()),
        response_schema: options.response_schema.clone(),
    };

    GeminiRequest {
        contents,
        system_instruction,
        generation_config,
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(response: GeminiResponse) -> Result<String, AdvisorError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(AdvisorError::Api(format!("Prompt was blocked: {}", reason)));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AdvisorError::Api("No valid response from Gemini".to_string()))?;

    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "unknown".to_string());
        return Err(AdvisorError::Api(format!(
            "Gemini returned an empty reply (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}
