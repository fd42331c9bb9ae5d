use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::Json,
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

use crate::{
    clients::{LlmRecommender, MovieInfoSource, MovieRecommender, OmdbClient},
    config::ServiceConfig,
    error::RecommendationError,
    models::{Mood, MovieRecommendation},
};

pub const INVALID_MOOD: &str = "invalid mood";
pub const NO_MOVIE_FOUND: &str = "no movie found for the given mood";

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;
type ApiError = (StatusCode, Json<Value>);

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn not_found_error(message: &str) -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message })))
}

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<dyn MovieRecommender>,
    pub movie_info: Arc<dyn MovieInfoSource>,
}

impl AppState {
    pub fn new(
        recommender: Arc<dyn MovieRecommender>,
        movie_info: Arc<dyn MovieInfoSource>,
    ) -> Self {
        Self {
            recommender,
            movie_info,
        }
    }

    /// Builds the production clients once for the lifetime of the server
    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        let recommender = LlmRecommender::new(
            &config.openrouter_api_key,
            &config.openrouter_base_url,
            &config.llm_model,
            config.upstream_timeout,
        )?;
        let movie_info = OmdbClient::new(
            config.omdb_base_url.clone(),
            config.omdb_api_key.clone(),
            config.upstream_timeout,
        )?;

        Ok(Self::new(Arc::new(recommender), Arc::new(movie_info)))
    }
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/movie/{mood}", get(get_movie_by_mood))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(correlation_id_middleware))
        .with_state(app_state)
}

/// Tags each request with an `x-correlation-id` and runs it inside a span carrying it
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4().to_string();
    let header = HeaderValue::from_str(&correlation_id).expect("uuid is a valid header value");

    request
        .headers_mut()
        .insert("x-correlation-id", header.clone());

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    let mut response = next.run(request).instrument(span).await;
    response.headers_mut().insert("x-correlation-id", header);
    response
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Mood Movie Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "LLM-picked movie recommendations for a mood, enriched with OMDb metadata",
        "endpoints": {
            "GET /movie/{mood}": "Recommend a movie for a mood (angry or happy)",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_movie_by_mood(
    State(state): State<AppState>,
    Path(mood): Path<String>,
) -> ApiResult<MovieRecommendation> {
    let mood: Mood = mood.parse().map_err(|e| {
        info!(error = %e, "Rejecting request");
        bad_request_error(INVALID_MOOD)
    })?;

    info!(mood = %mood, "Received recommendation request");

    let title = recommend_title(&state, mood).await?;
    let extended_info = lookup_extended_info(&state, &title).await;

    info!(mood = %mood, title = %title, "Recommendation served");

    Ok(Json(MovieRecommendation {
        mood,
        recommended: title,
        extended_info,
    }))
}

// Upstream failures and "no movie" both answer 404; only the logs tell them apart.
async fn recommend_title(state: &AppState, mood: Mood) -> Result<String, ApiError> {
    match state.recommender.recommend(mood).await {
        Ok(Some(title)) => Ok(title),
        Ok(None) => {
            info!(mood = %mood, "LLM named no movie");
            Err(not_found_error(NO_MOVIE_FOUND))
        }
        Err(e @ RecommendationError::MalformedReply { .. }) => {
            warn!(mood = %mood, error = %e, "LLM reply was not usable");
            Err(not_found_error(NO_MOVIE_FOUND))
        }
        Err(e) => {
            error!(mood = %mood, error = %e, "LLM recommendation failed");
            Err(not_found_error(NO_MOVIE_FOUND))
        }
    }
}

async fn lookup_extended_info(state: &AppState, title: &str) -> String {
    match state.movie_info.extended_info(title).await {
        Ok(info) => info,
        Err(e) => {
            warn!(title = %title, error = %e, "Continuing without extended movie info");
            String::new()
        }
    }
}
