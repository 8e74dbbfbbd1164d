use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use serde_json::json;

use service::access::domain::Role;

use crate::errors::ApiError;
use crate::routes::auth::{bearer_token, GatewayState};

#[derive(Debug, Deserialize)]
pub struct OrchestrateRequest {
    pub servicio_destino: String,
    pub parametros_adicionales: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRulesRequest {
    pub reglas: serde_json::Map<String, serde_json::Value>,
}

/// POST /orquestar — administrators and orchestrators may dispatch; the
/// request is acknowledged with an echo of the submitted parameters.
pub async fn orchestrate(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(input): Json<OrchestrateRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let role = state.access.authenticate(bearer_token(&headers))?;
    state.access.require_any(
        role,
        &[Role::Administrator, Role::Orchestrator],
        "No autorizado",
    )?;
    Ok(Json(json!({
        "mensaje": format!("Servicio '{}' orquestado correctamente.", input.servicio_destino),
        "parametros": input.parametros_adicionales,
    })))
}

/// PUT /actualizar-reglas-orquestacion — orchestrator-only rule update,
/// echoed back as accepted.
pub async fn update_rules(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(input): Json<UpdateRulesRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let role = state.access.authenticate(bearer_token(&headers))?;
    state.access.require_any(
        role,
        &[Role::Orchestrator],
        "Solo orquestadores pueden actualizar reglas",
    )?;
    Ok(Json(json!({
        "mensaje": "Reglas de orquestación actualizadas",
        "nuevas_reglas": input.reglas,
    })))
}
