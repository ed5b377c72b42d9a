//! Structured recommendations and the adapter that requests them.

use crate::advisor::profile::Profile;
use crate::advisor::prompts;
use crate::core::error::AdvisorError;
use crate::providers::{GenerationOptions, LLMProvider, Turn, strip_code_fence};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerPath {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub career_paths: Vec<CareerPath>,
    pub universities: Vec<University>,
    pub motivation: String,
}

impl RecommendationResult {
    /// Parses a model reply, tolerating a surrounding code fence.
    pub fn from_reply(reply: &str) -> Result<Self, AdvisorError> {
        let result: RecommendationResult = serde_json::from_str(strip_code_fence(reply))?;

        if result.career_paths.is_empty() {
            return Err(AdvisorError::Api(
                "response contained no career paths".to_string(),
            ));
        }
        if result.universities.is_empty() {
            return Err(AdvisorError::Api(
                "response contained no universities".to_string(),
            ));
        }
        if !(3..=5).contains(&result.career_paths.len())
            || !(5..=7).contains(&result.universities.len())
        {
            tracing::warn!(
                career_paths = result.career_paths.len(),
                universities = result.universities.len(),
                "recommendation counts outside the requested ranges"
            );
        }

        Ok(result)
    }
}

/// Response schema in the OpenAPI subset understood by Gemini.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "careerPaths": {
                "type": "ARRAY",
                "description": "A list of 3-5 suitable career paths for a Nigerian student.",
                "minItems": 3,
                "maxItems": 5,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING", "description": "The name of the career path." },
                        "description": { "type": "STRING", "description": "A brief description of the career path." },
                        "courses": {
                            "type": "ARRAY",
                            "description": "A list of 2-3 relevant university courses for this career.",
                            "items": { "type": "STRING" }
                        }
                    },
                    "required": ["title", "description", "courses"]
                }
            },
            "universities": {
                "type": "ARRAY",
                "description": "A list of 5-7 recommended Nigerian universities, mixing Federal, State, and Private options that match the user's budget.",
                "minItems": 5,
                "maxItems": 7,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "The full name of the university." },
                        "location": { "type": "STRING", "description": "The city and state where the university is located." },
                        "type": { "type": "STRING", "description": "The type of university (e.g., Federal, State, Private)." }
                    },
                    "required": ["name", "location", "type"]
                }
            },
            "motivation": {
                "type": "STRING",
                "description": "A short, motivational paragraph to encourage the student on their journey, ending with a positive message like 'Remember, success begins with self-awareness. Believe in your path!'"
            }
        },
        "required": ["careerPaths", "universities", "motivation"]
    })
}

/// Sends a finished profile to the advice service and parses the structured reply.
#[derive(Clone)]
pub struct RecommendationAdapter {
    provider: Arc<dyn LLMProvider>,
    options: GenerationOptions,
}

impl RecommendationAdapter {
    pub fn new(provider: Arc<dyn LLMProvider>, temperature: f32) -> Self {
        Self {
            provider,
            options: GenerationOptions {
                system_instruction: prompts::SYSTEM_INSTRUCTION.to_string(),
                temperature,
                response_schema: Some(response_schema()),
            },
        }
    }

    /// Every failure (transport, status, parse, empty lists) comes back as
    /// `AdvisorError::Recommendation` with a message fit for the student.
    pub async fn recommend(&self, profile: &Profile) -> Result<RecommendationResult, AdvisorError> {
        if !profile.is_complete() {
            return Err(AdvisorError::Recommendation(
                "the profile is incomplete".to_string(),
            ));
        }

        let prompt = prompts::recommendation_prompt(profile);
        let reply = self
            .provider
            .generate_content(&[Turn::user(prompt)], &self.options)
            .await
            .map_err(recommendation_failure)?;

        RecommendationResult::from_reply(&reply).map_err(recommendation_failure)
    }
}

fn recommendation_failure(err: AdvisorError) -> AdvisorError {
    tracing::error!(error = %err, "error generating recommendations");
    AdvisorError::Recommendation(prompts::RECOMMENDATION_FAILED.to_string())
}
