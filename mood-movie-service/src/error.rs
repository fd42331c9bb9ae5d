use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid mood: {0:?}")]
pub struct InvalidMood(pub String);

/// Failures while asking the LLM for a title.
///
/// An empty reply array is not an error; see `parse_title`.
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("LLM request failed: {0}")]
    Request(#[from] rig::completion::PromptError),

    #[error("LLM request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Could not parse LLM reply: {source}. Raw reply: {raw}")]
    MalformedReply {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum MovieInfoError {
    #[error("movie info request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response status code: {0}")]
    Status(reqwest::StatusCode),

    #[error("error decoding movie info response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("movie info lookup missed: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
