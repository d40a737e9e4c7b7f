use std::sync::Arc;

use mindspace_api::auth::rate_limit::{spawn_cleanup_worker, RateLimitState};
use mindspace_api::config::Config;
use mindspace_api::{db, router, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindspace_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    // Database
    let db = db::create_pool(&config).await;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let rate_limiter = RateLimitState::new();
    spawn_cleanup_worker(rate_limiter.clone());

    let state = AppState {
        db,
        config: config.clone(),
        rate_limiter,
    };

    let app = router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    // Connect info feeds the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .expect("Server error");
}
