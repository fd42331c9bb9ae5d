pub mod movie_info;
pub mod recommender;

pub use movie_info::{MovieInfoSource, OmdbClient};
pub use recommender::{LlmRecommender, MovieRecommender, build_prompt, parse_title};
