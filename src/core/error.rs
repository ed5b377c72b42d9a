use std::io;
use thiserror::Error;

/// Unified error type for the SmartCareer advisor
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// The initial recommendation request could not be completed
    #[error("Recommendation generation failed: {0}")]
    Recommendation(String),

    /// A follow-up chat turn could not be completed
    #[error("Follow-up failed: {0}")]
    FollowUp(String),

    /// The advice service answered, but not with something usable
    #[error("API error: {0}")]
    Api(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors, including actions that are not allowed in the current step
    #[error("Input error: {0}")]
    Input(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for AdvisorError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL never reaches messages or logs
        let err = err.without_url();
        if err.is_timeout() {
            AdvisorError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            AdvisorError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            AdvisorError::Serialization(format!("Failed to decode response: {}", err))
        } else {
            AdvisorError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        AdvisorError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for AdvisorError {
    fn from(err: serde_yml::Error) -> Self {
        AdvisorError::Serialization(format!("YAML error: {}", err))
    }
}

impl From<rustyline::error::ReadlineError> for AdvisorError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        AdvisorError::Input(format!("Line editor error: {}", err))
    }
}
