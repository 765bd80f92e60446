//! GetClassRoomHandler - Query handler for class room details.

use std::sync::Arc;

use super::{load_with_course, ClassRoomView};
use crate::domain::class_room::ClassRoomError;
use crate::domain::foundation::ClassRoomId;
use crate::ports::{ClassRoomRepository, Clock, CourseRepository};

/// Query to get a class room by ID.
#[derive(Debug, Clone)]
pub struct GetClassRoomQuery {
    pub class_room_id: ClassRoomId,
}

/// Handler for retrieving class room details.
pub struct GetClassRoomHandler {
    courses: Arc<dyn CourseRepository>,
    class_rooms: Arc<dyn ClassRoomRepository>,
    clock: Arc<dyn Clock>,
}

impl GetClassRoomHandler {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        class_rooms: Arc<dyn ClassRoomRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            courses,
            class_rooms,
            clock,
        }
    }

    pub async fn handle(&self, query: GetClassRoomQuery) -> Result<ClassRoomView, ClassRoomError> {
        let (class_room, course) =
            load_with_course(self.class_rooms.as_ref(), self.courses.as_ref(), query.class_room_id)
                .await?;

        Ok(ClassRoomView::new(class_room, course, self.clock.now()))
    }
}
