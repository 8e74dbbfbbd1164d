pub mod auth;
pub mod orchestration;
pub mod services;

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::routes::auth::GatewayState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public login + health, and the
/// token-gated orchestration endpoints.
pub fn build_router(cors: CorsLayer, state: GatewayState) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/autenticar-usuario", post(auth::authenticate_user));

    // Token-gated routes; each handler resolves the caller's role itself
    let gated = Router::new()
        .route("/orquestar", post(orchestration::orchestrate))
        .route("/informacion-servicio/:id", get(services::service_info))
        .route("/registrar-servicio", post(services::register_service))
        .route(
            "/actualizar-reglas-orquestacion",
            put(orchestration::update_rules),
        )
        .route("/autorizar-acceso", post(auth::authorize_access));

    // Compose
    public
        .merge(gated)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
