//! LeaveClassRoomHandler - Command handler for leaving a class room.

use std::sync::Arc;

use tracing::debug;

use super::{load_with_course, ClassRoomView};
use crate::domain::class_room::ClassRoomError;
use crate::domain::foundation::{ClassRoomId, CommandMetadata};
use crate::ports::{ClassRoomRepository, Clock, CourseRepository};

/// Command to remove the acting user from a class room.
#[derive(Debug, Clone)]
pub struct LeaveClassRoomCommand {
    pub class_room_id: ClassRoomId,
}

/// Handler for leaving class rooms.
pub struct LeaveClassRoomHandler {
    courses: Arc<dyn CourseRepository>,
    class_rooms: Arc<dyn ClassRoomRepository>,
    clock: Arc<dyn Clock>,
}

impl LeaveClassRoomHandler {
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
        cmd: LeaveClassRoomCommand,
        metadata: CommandMetadata,
    ) -> Result<ClassRoomView, ClassRoomError> {
        let (class_room, course) =
            load_with_course(self.class_rooms.as_ref(), self.courses.as_ref(), cmd.class_room_id)
                .await?;

        let now = self.clock.now();
        let transition = class_room.leave(metadata.user_id.clone(), now);
        self.class_rooms.append(&transition).await?;

        debug!(
            class_room_id = %cmd.class_room_id,
            user_id = %metadata.user_id,
            timer = transition.appended[0].timer(),
            "User left class room"
        );

        Ok(ClassRoomView::new(transition.class_room, course, now))
    }
}
