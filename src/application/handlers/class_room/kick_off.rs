//! KickOffHandler - Command handler for starting a class room.

use std::sync::Arc;

use tracing::info;

use super::ClassRoomView;
use crate::domain::class_room::{ClassRoom, ClassRoomError};
use crate::domain::foundation::{CommandMetadata, CourseId};
use crate::ports::{ClassRoomRepository, Clock, CourseRepository};

/// Command to start a class room for a course.
#[derive(Debug, Clone)]
pub struct KickOffCommand {
    pub course_id: CourseId,
}

/// Handler for kicking off class rooms.
pub struct KickOffHandler {
    courses: Arc<dyn CourseRepository>,
    class_rooms: Arc<dyn ClassRoomRepository>,
    clock: Arc<dyn Clock>,
}

impl KickOffHandler {
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

    pub async fn handle(
        &self,
        cmd: KickOffCommand,
        metadata: CommandMetadata,
    ) -> Result<ClassRoomView, ClassRoomError> {
        let course = self
            .courses
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or(ClassRoomError::CourseNotFound(cmd.course_id))?;

        let now = self.clock.now();
        let transition = ClassRoom::kick_off(&course, metadata.user_id.clone(), now);
        self.class_rooms.create(&transition).await?;

        info!(
            class_room_id = %transition.class_room.id(),
            course_id = %course.id(),
            user_id = %metadata.user_id,
            correlation_id = %metadata.correlation_id(),
            "Class room kicked off"
        );

        Ok(ClassRoomView::new(transition.class_room, course, now))
    }
}
