use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use service::access::domain::Role;

use crate::errors::ApiError;
use crate::routes::auth::{bearer_token, GatewayState};

#[derive(Debug, Deserialize)]
pub struct RegisterServiceRequest {
    pub nombre: String,
    pub descripcion: String,
    pub endpoints: Vec<String>,
}

/// GET /informacion-servicio/:id — any authenticated caller; there is no
/// registry behind this, the record is synthesized from the id. The id is
/// a plain signed integer on the wire, negatives included.
pub async fn service_info(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let _role = state.access.authenticate(bearer_token(&headers))?;
    Ok(Json(json!({
        "id": id,
        "nombre": format!("Servicio{}", id),
        "descripcion": "Servicio de ejemplo",
        "endpoints": ["https://api.servicio.com/accion"],
    })))
}

/// POST /registrar-servicio — administrator-only; acknowledges the submitted
/// record without storing it.
pub async fn register_service(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(input): Json<RegisterServiceRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let role = state.access.authenticate(bearer_token(&headers))?;
    state.access.require_any(
        role,
        &[Role::Administrator],
        "Solo administradores pueden registrar servicios",
    )?;
    Ok(Json(json!({
        "mensaje": format!("Servicio '{}' registrado exitosamente.", input.nombre),
        "descripcion": input.descripcion,
        "endpoints": input.endpoints,
    })))
}
