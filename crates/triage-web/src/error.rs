//! 错误响应

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{error, warn};
use triage_core::TriageError;

/// HTTP层错误，统一输出 `{"success": false, "error": ...}`
#[derive(Debug)]
pub struct ApiError(pub TriageError);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(TriageError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(TriageError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            TriageError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            TriageError::ExternalService(_) => (
                StatusCode::BAD_GATEWAY,
                "Facility lookup is currently unavailable".to_string(),
            ),
            TriageError::Config(_)
            | TriageError::Database(_)
            | TriageError::Network(_)
            | TriageError::Serialization(_)
            | TriageError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Operation failed".to_string(),
            ),
        };

        // 服务端错误只记录日志，不向客户端暴露细节
        if status.is_server_error() {
            error!("Request failed ({}): {}", status, self.0);
        } else {
            warn!("Rejected request: {}", self.0);
        }

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
