use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::debug;

use service::access::errors::AccessError;

/// Wire mapping for access errors: 401 for authentication failures, 403 for
/// role-gate rejections, FastAPI-style `{"detail": …}` body in both cases.
#[derive(Debug)]
pub struct ApiError(pub AccessError);

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AccessError::Forbidden(_) => StatusCode::FORBIDDEN,
            AccessError::InvalidToken | AccessError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
        };
        let detail = self.0.to_string();
        debug!(code = self.0.code(), %status, %detail, "request rejected");
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let resp = ApiError(AccessError::InvalidToken).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let resp = ApiError(AccessError::Forbidden("No autorizado".into())).into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let resp = ApiError(AccessError::InvalidCredentials).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
