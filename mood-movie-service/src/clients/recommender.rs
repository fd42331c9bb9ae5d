use async_trait::async_trait;
use rig::{
    agent::Agent,
    client::{ClientBuilderError, CompletionClient},
    completion::Prompt,
    providers::openrouter,
};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::RecommendationError;
use crate::models::{Mood, MovieTitle};

/// Produces a movie title for a mood.
///
/// `Ok(None)` means the model answered but named no movie.
#[async_trait]
pub trait MovieRecommender: Send + Sync {
    async fn recommend(&self, mood: Mood) -> Result<Option<String>, RecommendationError>;
}

/// Recommender backed by a single-turn OpenRouter chat completion
pub struct LlmRecommender {
    agent: Agent<openrouter::CompletionModel>,
    timeout: Duration,
}

impl LlmRecommender {
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, ClientBuilderError> {
        let client = openrouter::Client::builder(api_key)
            .base_url(base_url)
            .build()?;
        let agent = client.agent(model).build();
        info!(model = %model, base_url = %base_url, "LLM recommender initialised");
        Ok(Self { agent, timeout })
    }
}

#[async_trait]
impl MovieRecommender for LlmRecommender {
    async fn recommend(&self, mood: Mood) -> Result<Option<String>, RecommendationError> {
        let prompt = build_prompt(mood);

        let reply = tokio::time::timeout(self.timeout, async {
            self.agent.prompt(&prompt).await
        })
        .await
        .map_err(|_| RecommendationError::Timeout(self.timeout))??;

        debug!(mood = %mood, reply = %reply, "LLM replied");
        parse_title(&reply)
    }
}

pub fn build_prompt(mood: Mood) -> String {
    format!(
        r#"
        You are a movie recommendation assistant.
        Send me one movie title based on this mood: {mood}
        Respond **only** with JSON: an array holding exactly one object with the key "title",
        of the form [{{"title": "..."}}]"#
    )
}

/// Reads the first title out of the model's reply.
///
/// The reply must be a bare JSON array. Models sometimes wrap the array in prose or a
/// code fence; such replies are reported as `MalformedReply` and not repaired.
pub fn parse_title(reply: &str) -> Result<Option<String>, RecommendationError> {
    let movies: Vec<MovieTitle> =
        serde_json::from_str(reply).map_err(|source| RecommendationError::MalformedReply {
            raw: reply.to_string(),
            source,
        })?;

    Ok(movies
        .into_iter()
        .next()
        .map(|movie| movie.title)
        .filter(|title| !title.is_empty()))
}
