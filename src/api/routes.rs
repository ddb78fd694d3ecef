use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Colleges & recommendations
        .route("/get-colleges", get(handlers::get_colleges))
        .route(
            "/get-recommendations/:username",
            get(handlers::get_recommendations),
        )
        // Assessments
        .route("/save-assessment", post(handlers::save_assessment))
        .route(
            "/check-assessment/:username",
            get(handlers::check_assessment),
        )
        // Accounts
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .route("/google-signup", post(handlers::google_signup))
        .route("/google-login", post(handlers::google_login))
        // Generative-AI proxy
        .route("/gemini-proxy", post(handlers::gemini_proxy))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
