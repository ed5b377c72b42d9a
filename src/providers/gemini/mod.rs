use crate::core::error::AdvisorError;
use crate::providers::{GenerationOptions, LLMProvider, Turn};
use async_trait::async_trait;
use std::time::Duration;

mod client;
mod types;

pub use client::GeminiClient;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, AdvisorError> {
        Self::with_endpoint(DEFAULT_BASE_URL.to_string(), api_key, model, timeout)
    }

    pub fn with_endpoint(
        endpoint: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, AdvisorError> {
        Ok(Self {
            client: GeminiClient::new(endpoint, api_key, model, timeout)?,
        })
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn generate_content(
        &self,
        turns: &[Turn],
        options: &GenerationOptions,
    ) -> Result<String, AdvisorError> {
        self.client.generate_content(turns, options).await
    }

    fn model(&self) -> &str {
        &self.client.model
    }
}
