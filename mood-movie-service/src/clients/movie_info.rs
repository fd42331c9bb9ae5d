use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use crate::error::MovieInfoError;
use crate::models::OmdbMovie;

/// Looks up the extended info string for a movie title
#[async_trait]
pub trait MovieInfoSource: Send + Sync {
    async fn extended_info(&self, title: &str) -> Result<String, MovieInfoError>;
}

/// Client for the OMDb title lookup endpoint
pub struct OmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MovieInfoError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Fetches the full-plot record for `title`. No retries.
    pub async fn fetch(&self, title: &str) -> Result<OmdbMovie, MovieInfoError> {
        debug!(title = %title, "Requesting movie info");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("plot", "full"),
                ("t", title),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(MovieInfoError::Status(status));
        }

        let body = response.text().await?;
        let movie: OmdbMovie = serde_json::from_str(&body)?;

        if movie.is_miss() {
            let reason = movie
                .error
                .unwrap_or_else(|| "no error message".to_string());
            return Err(MovieInfoError::NotFound(reason));
        }

        Ok(movie)
    }
}

#[async_trait]
impl MovieInfoSource for OmdbClient {
    async fn extended_info(&self, title: &str) -> Result<String, MovieInfoError> {
        let movie = self.fetch(title).await?;
        Ok(movie.extended_info())
    }
}
