use crate::core::error::AdvisorError;
use reqwest::{Client, Response};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Thin JSON-over-HTTP client shared by providers.
///
/// Holds the base URL and fixed headers (Gemini passes its key as
/// `x-goog-api-key`), and turns non-2xx replies into errors.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    headers: HashMap<String, String>,
}

impl HttpClient {
    pub fn new(
        base_url: String,
        timeout: Duration,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Result<Self, AdvisorError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdvisorError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: extra_headers.unwrap_or_default(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, AdvisorError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        let response = request.json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "advice service returned an error status");
            return Err(AdvisorError::Api(format!(
                "{}: {}",
                status,
                summarize_error_body(&body)
            )));
        }

        Ok(response)
    }
}

/// Pulls `error.message` out of a Google-style error body, falling back to the raw text.
fn summarize_error_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
