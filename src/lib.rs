use std::sync::Arc;

use sqlx::PgPool;

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use app::router;

use auth::rate_limit::RateLimitState;
use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: RateLimitState,
}
