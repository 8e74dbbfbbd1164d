use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use service::access::service::AccessService;

use crate::errors::ApiError;

/// Shared handler state: the read-only access service built at startup.
#[derive(Clone)]
pub struct GatewayState {
    pub access: Arc<AccessService>,
}

/// The raw `Authorization` header value is the token; there is no scheme
/// prefix on this wire.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub nombre_usuario: String,
    pub contrasena: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthorizeRequest {
    pub recursos: Vec<String>,
    pub rol_usuario: String,
}

/// POST /autenticar-usuario — public; trades a username/password pair for
/// the matching bearer token.
pub async fn authenticate_user(
    State(state): State<GatewayState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = state.access.login(&input.nombre_usuario, &input.contrasena)?;
    Ok(Json(json!({ "token": token })))
}

/// POST /autorizar-acceso — the claimed role must equal the caller's
/// resolved role.
pub async fn authorize_access(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(input): Json<AuthorizeRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let role = state.access.authenticate(bearer_token(&headers))?;
    state.access.authorize_claim(role, &input.rol_usuario)?;
    Ok(Json(json!({
        "mensaje": "Acceso autorizado",
        "rol": input.rol_usuario,
        "recursos": input.recursos,
    })))
}
