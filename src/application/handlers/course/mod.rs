//! Course catalogue query handlers.

mod get_course;
mod list_courses;

pub use get_course::{GetCourseHandler, GetCourseQuery};
pub use list_courses::ListCoursesHandler;

use crate::domain::course::Course;
use crate::domain::foundation::ClassRoomId;

/// A course with the class rooms run for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseView {
    pub course: Course,
    pub class_rooms: Vec<ClassRoomId>,
}
