//! GetCourseHandler - Query handler for one course.

use std::sync::Arc;

use super::CourseView;
use crate::domain::class_room::ClassRoomError;
use crate::domain::foundation::CourseId;
use crate::ports::{ClassRoomRepository, CourseRepository};

/// Query to get a course by ID.
#[derive(Debug, Clone)]
pub struct GetCourseQuery {
    pub course_id: CourseId,
}

pub struct GetCourseHandler {
    courses: Arc<dyn CourseRepository>,
    class_rooms: Arc<dyn ClassRoomRepository>,
}

impl GetCourseHandler {
    pub fn new(courses: Arc<dyn CourseRepository>, class_rooms: Arc<dyn ClassRoomRepository>) -> Self {
        Self {
            courses,
            class_rooms,
        }
    }

    pub async fn handle(&self, query: GetCourseQuery) -> Result<CourseView, ClassRoomError> {
        let course = self
            .courses
            .find_by_id(&query.course_id)
            .await?
            .ok_or(ClassRoomError::CourseNotFound(query.course_id))?;

        let class_rooms = self.class_rooms.list_ids_by_course(&query.course_id).await?;

        Ok(CourseView {
            course,
            class_rooms,
        })
    }
}
