//! HTTP handlers for course endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::CourseResponse;
use crate::adapters::http::error::{handle_class_room_error, unresolvable_id};
use crate::application::handlers::{GetCourseHandler, GetCourseQuery, ListCoursesHandler};
use crate::domain::foundation::{CourseId, ErrorCode};

#[derive(Clone)]
pub struct CourseHandlers {
    list_handler: Arc<ListCoursesHandler>,
    get_handler: Arc<GetCourseHandler>,
}

impl CourseHandlers {
    pub fn new(list_handler: Arc<ListCoursesHandler>, get_handler: Arc<GetCourseHandler>) -> Self {
        Self {
            list_handler,
            get_handler,
        }
    }
}

/// GET /api/courses - List courses ordered by title
pub async fn list_courses(State(handlers): State<CourseHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(views) => {
            let response: Vec<CourseResponse> = views.into_iter().map(CourseResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_class_room_error(e),
    }
}

/// GET /api/courses/:id - Get one course
pub async fn get_course(
    State(handlers): State<CourseHandlers>,
    Path(course_id): Path<String>,
) -> Response {
    let course_id = match course_id.parse::<CourseId>() {
        Ok(id) => id,
        Err(_) => return unresolvable_id(ErrorCode::CourseNotFound, "Course", &course_id),
    };

    match handlers.get_handler.handle(GetCourseQuery { course_id }).await {
        Ok(view) => (StatusCode::OK, Json(CourseResponse::from(view))).into_response(),
        Err(e) => handle_class_room_error(e),
    }
}
