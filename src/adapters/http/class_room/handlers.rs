//! HTTP handlers for class room endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{ChangePhaseRequest, ClassRoomResponse, KickOffRequest};
use crate::adapters::http::error::{handle_class_room_error, unresolvable_id, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::REQUEST_ID_HEADER;
use crate::application::handlers::{
    ChangePhaseCommand, ChangePhaseHandler, ClassRoomView, GetClassRoomHandler, GetClassRoomQuery,
    JoinClassRoomCommand, JoinClassRoomHandler, KickOffCommand, KickOffHandler,
    LeaveClassRoomCommand, LeaveClassRoomHandler,
};
use crate::domain::class_room::ClassRoomError;
use crate::domain::foundation::{
    AuthenticatedUser, ClassRoomId, CommandMetadata, CourseId, ErrorCode, PhaseId,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ClassRoomHandlers {
    kick_off_handler: Arc<KickOffHandler>,
    join_handler: Arc<JoinClassRoomHandler>,
    leave_handler: Arc<LeaveClassRoomHandler>,
    change_phase_handler: Arc<ChangePhaseHandler>,
    get_handler: Arc<GetClassRoomHandler>,
}

impl ClassRoomHandlers {
    pub fn new(
        kick_off_handler: Arc<KickOffHandler>,
        join_handler: Arc<JoinClassRoomHandler>,
        leave_handler: Arc<LeaveClassRoomHandler>,
        change_phase_handler: Arc<ChangePhaseHandler>,
        get_handler: Arc<GetClassRoomHandler>,
    ) -> Self {
        Self {
            kick_off_handler,
            join_handler,
            leave_handler,
            change_phase_handler,
            get_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/classrooms - Kick off a class room for a course
pub async fn kick_off(
    State(handlers): State<ClassRoomHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    body: Result<Json<KickOffRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let course_id = match required_id::<CourseId>(req.course_id, "course_id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = handlers
        .kick_off_handler
        .handle(KickOffCommand { course_id }, metadata(user, &headers))
        .await;
    respond(result)
}

/// GET /api/classrooms/:id - Class room with live timer
pub async fn get_class_room(
    State(handlers): State<ClassRoomHandlers>,
    Path(class_room_id): Path<String>,
) -> Response {
    let class_room_id = match parse_class_room_id(&class_room_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = handlers
        .get_handler
        .handle(GetClassRoomQuery { class_room_id })
        .await;
    respond(result)
}

/// POST /api/classrooms/:id/join - Join as the acting user
pub async fn join_class_room(
    State(handlers): State<ClassRoomHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path(class_room_id): Path<String>,
) -> Response {
    let class_room_id = match parse_class_room_id(&class_room_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = handlers
        .join_handler
        .handle(JoinClassRoomCommand { class_room_id }, metadata(user, &headers))
        .await;
    respond(result)
}

/// POST /api/classrooms/:id/leave - Leave as the acting user
pub async fn leave_class_room(
    State(handlers): State<ClassRoomHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path(class_room_id): Path<String>,
) -> Response {
    let class_room_id = match parse_class_room_id(&class_room_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = handlers
        .leave_handler
        .handle(LeaveClassRoomCommand { class_room_id }, metadata(user, &headers))
        .await;
    respond(result)
}

/// POST /api/classrooms/:id/change_phase - Move to another phase of the course
pub async fn change_phase(
    State(handlers): State<ClassRoomHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path(class_room_id): Path<String>,
    body: Result<Json<ChangePhaseRequest>, JsonRejection>,
) -> Response {
    let class_room_id = match parse_class_room_id(&class_room_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let to_phase_id = match required_id::<PhaseId>(req.to_phase_id, "to_phase_id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = handlers
        .change_phase_handler
        .handle(
            ChangePhaseCommand {
                class_room_id,
                to_phase_id,
            },
            metadata(user, &headers),
        )
        .await;
    respond(result)
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn metadata(user: AuthenticatedUser, headers: &HeaderMap) -> CommandMetadata {
    let metadata = CommandMetadata::new(user.id).with_source("http");
    match headers.get(&REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
        Some(request_id) => metadata.with_correlation_id(request_id),
        None => metadata,
    }
}

fn respond(result: Result<ClassRoomView, ClassRoomError>) -> Response {
    match result {
        Ok(view) => (StatusCode::OK, Json(ClassRoomResponse::from(view))).into_response(),
        Err(e) => handle_class_room_error(e),
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

fn parse_class_room_id(raw: &str) -> Result<ClassRoomId, Response> {
    raw.parse::<ClassRoomId>()
        .map_err(|_| unresolvable_id(ErrorCode::ClassRoomNotFound, "Class room", raw))
}

/// Parses a required body id, answering 400 when absent or malformed.
fn required_id<T: std::str::FromStr>(raw: Option<String>, field: &str) -> Result<T, Response> {
    let raw = raw
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| bad_request(format!("Missing required field '{}'", field)))?;
    raw.trim()
        .parse::<T>()
        .map_err(|_| bad_request(format!("Field '{}' is not a valid id", field)))
}
