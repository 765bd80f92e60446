//! HTTP routes for class room endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    change_phase, get_class_room, join_class_room, kick_off, leave_class_room, ClassRoomHandlers,
};

/// Creates the class room router with all endpoints.
pub fn class_room_routes(handlers: ClassRoomHandlers) -> Router {
    Router::new()
        .route("/", post(kick_off))
        .route("/:id", get(get_class_room))
        .route("/:id/join", post(join_class_room))
        .route("/:id/leave", post(leave_class_room))
        .route("/:id/change_phase", post(change_phase))
        .with_state(handlers)
}
