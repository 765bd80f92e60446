//! Class room error types.

use crate::domain::foundation::{
    ClassRoomId, CourseId, DomainError, ErrorCode, PhaseId, ValidationError,
};
use thiserror::Error;

/// Errors surfaced by class room and catalogue operations.
///
/// Every variant is terminal for the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassRoomError {
    #[error("Course not found: {0}")]
    CourseNotFound(CourseId),

    #[error("Class room not found: {0}")]
    ClassRoomNotFound(ClassRoomId),

    /// Not-found reported by an adapter without a usable id.
    #[error("{message}")]
    NotFound { code: ErrorCode, message: String },

    #[error("Phase {phase_id} is not part of course {course_id}")]
    InvalidPhase { phase_id: PhaseId, course_id: CourseId },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Class room was modified concurrently: {0}")]
    Conflict(String),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl ClassRoomError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        ClassRoomError::InvalidRequest(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ClassRoomError::Infrastructure(message.into())
    }

    fn not_found(err: DomainError) -> Self {
        ClassRoomError::NotFound {
            code: err.code,
            message: err.message,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ClassRoomError::CourseNotFound(_) => ErrorCode::CourseNotFound,
            ClassRoomError::ClassRoomNotFound(_) => ErrorCode::ClassRoomNotFound,
            ClassRoomError::NotFound { code, .. } => *code,
            ClassRoomError::InvalidPhase { .. } => ErrorCode::InvalidPhase,
            ClassRoomError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            ClassRoomError::Unauthorized => ErrorCode::Unauthorized,
            ClassRoomError::Conflict(_) => ErrorCode::ConcurrentModification,
            ClassRoomError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
}

impl From<DomainError> for ClassRoomError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ClassRoomNotFound => match err.detail("class_room_id") {
                Some(id) => ClassRoomError::ClassRoomNotFound(id),
                None => ClassRoomError::not_found(err),
            },
            ErrorCode::CourseNotFound => match err.detail("course_id") {
                Some(id) => ClassRoomError::CourseNotFound(id),
                None => ClassRoomError::not_found(err),
            },
            ErrorCode::PhaseNotFound => ClassRoomError::not_found(err),
            ErrorCode::ConcurrentModification => ClassRoomError::Conflict(err.message),
            ErrorCode::ValidationFailed | ErrorCode::InvalidRequest => {
                ClassRoomError::InvalidRequest(err.message)
            }
            ErrorCode::Unauthorized => ClassRoomError::Unauthorized,
            _ => ClassRoomError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for ClassRoomError {
    fn from(err: ValidationError) -> Self {
        ClassRoomError::InvalidRequest(err.to_string())
    }
}
