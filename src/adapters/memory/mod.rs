//! In-memory repositories for development and tests.
//!
//! State lives in the process; restarting the service loses it.

mod class_room_repository;
mod course_repository;

pub use class_room_repository::InMemoryClassRoomRepository;
pub use course_repository::InMemoryCourseRepository;
