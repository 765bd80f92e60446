//! Class room command and query handlers.

mod change_phase;
mod get_class_room;
mod join;
mod kick_off;
mod leave;
mod view;

pub use change_phase::{ChangePhaseCommand, ChangePhaseHandler};
pub use get_class_room::{GetClassRoomHandler, GetClassRoomQuery};
pub use join::{JoinClassRoomCommand, JoinClassRoomHandler};
pub use kick_off::{KickOffCommand, KickOffHandler};
pub use leave::{LeaveClassRoomCommand, LeaveClassRoomHandler};
pub use view::ClassRoomView;

use crate::domain::class_room::{ClassRoom, ClassRoomError};
use crate::domain::course::Course;
use crate::domain::foundation::ClassRoomId;
use crate::ports::{ClassRoomRepository, CourseRepository};

/// Loads a class room together with the course it runs.
async fn load_with_course(
    class_rooms: &dyn ClassRoomRepository,
    courses: &dyn CourseRepository,
    id: ClassRoomId,
) -> Result<(ClassRoom, Course), ClassRoomError> {
    let class_room = class_rooms
        .find_by_id(&id)
        .await?
        .ok_or(ClassRoomError::ClassRoomNotFound(id))?;

    let course = courses
        .find_by_id(&class_room.course_id())
        .await?
        .ok_or(ClassRoomError::CourseNotFound(class_room.course_id()))?;

    Ok((class_room, course))
}
