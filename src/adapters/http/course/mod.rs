//! HTTP adapter for course catalogue endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CourseResponse, CourseSummaryResponse, PhaseResponse};
pub use handlers::CourseHandlers;
pub use routes::course_routes;
