//! ListCoursesHandler - Query handler for the course catalogue.

use std::sync::Arc;

use super::CourseView;
use crate::domain::class_room::ClassRoomError;
use crate::ports::{ClassRoomRepository, CourseRepository};

pub struct ListCoursesHandler {
    courses: Arc<dyn CourseRepository>,
    class_rooms: Arc<dyn ClassRoomRepository>,
}

impl ListCoursesHandler {
    pub fn new(courses: Arc<dyn CourseRepository>, class_rooms: Arc<dyn ClassRoomRepository>) -> Self {
        Self {
            courses,
            class_rooms,
        }
    }

    /// All courses ordered by title.
    pub async fn handle(&self) -> Result<Vec<CourseView>, ClassRoomError> {
        let courses = self.courses.list().await?;

        let mut views = Vec::with_capacity(courses.len());
        for course in courses {
            let class_rooms = self.class_rooms.list_ids_by_course(&course.id()).await?;
            views.push(CourseView {
                course,
                class_rooms,
            });
        }
        Ok(views)
    }
}
