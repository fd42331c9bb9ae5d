pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use config::ServiceConfig;
pub use service::{AppState, build_router};
pub use models::*;
