//! Materialised class room read model.

use crate::domain::class_room::ClassRoom;
use crate::domain::course::{Course, Phase};
use crate::domain::foundation::Timestamp;

/// A class room with its course, evaluated at `as_of`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRoomView {
    pub class_room: ClassRoom,
    pub course: Course,
    pub as_of: Timestamp,
}

impl ClassRoomView {
    pub fn new(class_room: ClassRoom, course: Course, as_of: Timestamp) -> Self {
        Self {
            class_room,
            course,
            as_of,
        }
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.class_room.current_phase()
    }

    /// Live accumulated timer.
    pub fn timer(&self) -> i64 {
        self.class_room.accumulated_timer(&self.as_of)
    }
}
