use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::handlers;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    // Auth routes with rate limiting
    let auth_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .merge(auth_routes);

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::auth::me))
        .route("/api/profile", get(handlers::auth::me))
        // Journal
        .route(
            "/api/journal",
            get(handlers::journal::list_entries).post(handlers::journal::create_entry),
        )
        .route(
            "/api/journal/:id",
            get(handlers::journal::get_entry)
                .put(handlers::journal::update_entry)
                .delete(handlers::journal::delete_entry),
        )
        // Insights
        .route(
            "/api/insights/mood-trend",
            get(handlers::insights::get_mood_trend),
        )
        .route(
            "/api/insights/mood-distribution",
            get(handlers::insights::get_mood_distribution),
        )
        // Therapists
        .route("/api/therapist/list", get(handlers::therapist::list_therapists))
        .route("/api/therapist/select", post(handlers::therapist::select_therapist))
        .route(
            "/api/therapist/disconnect",
            post(handlers::therapist::disconnect_therapist),
        )
        .route("/api/therapist/my-therapist", get(handlers::therapist::my_therapist))
        .route("/api/therapist/patients", get(handlers::therapist::list_patients))
        .route(
            "/api/therapist/patient/:id/mood-trend",
            get(handlers::therapist::patient_mood_trend),
        )
        .route(
            "/api/therapist/patient/:id/mood-distribution",
            get(handlers::therapist::patient_mood_distribution),
        )
        // Circles
        .route(
            "/api/circles",
            get(handlers::circles::list_circles).post(handlers::circles::create_circle),
        )
        .route("/api/circles/:id", delete(handlers::circles::delete_circle))
        .route("/api/circles/:id/join", post(handlers::circles::join_circle))
        .route("/api/circles/:id/leave", post(handlers::circles::leave_circle))
        .route(
            "/api/circles/:id/posts",
            get(handlers::circles::list_posts).post(handlers::circles::create_post),
        )
        .route("/api/circles/:id/members", get(handlers::circles::list_members))
        .route(
            "/api/circles/:id/members/:user_id",
            delete(handlers::circles::ban_member),
        )
        // Goals
        .route(
            "/api/goals",
            get(handlers::goals::list_goals).post(handlers::goals::create_goal),
        )
        .route(
            "/api/goals/:id",
            put(handlers::goals::update_goal).delete(handlers::goals::delete_goal),
        )
        // Meditations
        .route(
            "/api/meditations",
            get(handlers::meditations::list_meditations)
                .post(handlers::meditations::create_meditation),
        )
        .route(
            "/api/meditations/:id",
            get(handlers::meditations::get_meditation)
                .put(handlers::meditations::update_meditation)
                .delete(handlers::meditations::delete_meditation),
        )
        // Admin
        .route("/api/admin/users", get(handlers::admin::list_users))
        .route("/api/admin/users/:id/ban", put(handlers::admin::toggle_ban))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors_layer(&state))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = Vec::new();
    match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => origins.push(origin),
        Err(_) => tracing::warn!(url = %state.config.frontend_url, "FRONTEND_URL is not a valid origin"),
    }
    // Extra origins, e.g. LAN access during development
    if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
        origins.extend(
            extra
                .split(',')
                .filter_map(|o| o.trim().parse::<HeaderValue>().ok()),
        );
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
