use std::io;
use thiserror::Error;

/// Message shown to the user for any failure that is not an input problem.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't come up with a recipe. Please try again with different ingredients.";

/// Unified error type for pantrychef
#[derive(Error, Debug)]
pub enum ChefError {
    /// Input failed shape or non-emptiness checks; no external call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Structured recipe generation failed or returned a malformed payload
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Image generation failed or returned no media
    #[error("Image generation failed: {0}")]
    ImageGeneration(String),

    /// Provider returned an error response
    #[error("API error: {0}")]
    Api(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

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

impl ChefError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ChefError::Validation(_))
    }

    /// Human-readable message for end users. Only validation problems are
    /// explained; everything else collapses to one generic message.
    pub fn user_message(&self) -> String {
        match self {
            ChefError::Validation(msg) => msg.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ChefError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChefError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            ChefError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            ChefError::Api(format!("API returned error status: {}", err))
        } else {
            ChefError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for ChefError {
    fn from(err: serde_json::Error) -> Self {
        ChefError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for ChefError {
    fn from(err: serde_yml::Error) -> Self {
        ChefError::Serialization(format!("YAML error: {}", err))
    }
}

impl From<rustyline::error::ReadlineError> for ChefError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ChefError::Io {
            source: io::Error::other(err.to_string()),
        }
    }
}
