//! Error responses shared by all endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::class_room::ClassRoomError;
use crate::domain::foundation::ErrorCode;

/// Standard error body: `{"code": ..., "message": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }
}

/// 404 for a path id that does not parse, so it cannot resolve.
pub fn unresolvable_id(code: ErrorCode, resource: &str, raw: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(code, format!("{} not found: {}", resource, raw))),
    )
        .into_response()
}

/// Maps a handler error to its status and body.
pub fn handle_class_room_error(error: ClassRoomError) -> Response {
    let status = match &error {
        ClassRoomError::CourseNotFound(_)
        | ClassRoomError::ClassRoomNotFound(_)
        | ClassRoomError::NotFound { .. } => StatusCode::NOT_FOUND,
        ClassRoomError::InvalidPhase { .. } | ClassRoomError::InvalidRequest(_) => {
            StatusCode::BAD_REQUEST
        }
        ClassRoomError::Unauthorized => StatusCode::UNAUTHORIZED,
        ClassRoomError::Conflict(_) => StatusCode::CONFLICT,
        ClassRoomError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Request failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(error.code(), "Internal server error")),
            )
                .into_response();
        }
    };

    (status, Json(ErrorResponse::new(error.code(), error.to_string()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ClassRoomId, CourseId, DomainError, PhaseId};

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_class_room_error(ClassRoomError::ClassRoomNotFound(ClassRoomId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn adapter_not_found_maps_to_404() {
        let err = DomainError::new(ErrorCode::ClassRoomNotFound, "Class room not found: x");
        let response = handle_class_room_error(err.into());
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_phase_maps_to_400() {
        let response = handle_class_room_error(ClassRoomError::InvalidPhase {
            phase_id: PhaseId::new(),
            course_id: CourseId::new(),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_409() {
        let response = handle_class_room_error(ClassRoomError::Conflict("stale".to_string()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_class_room_error(ClassRoomError::infrastructure("db down"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_uses_error_code_names() {
        let body = ErrorResponse::new(ErrorCode::InvalidPhase, "nope");
        assert_eq!(body.code, "INVALID_PHASE");
    }
}
