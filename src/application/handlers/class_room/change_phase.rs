//! ChangePhaseHandler - Command handler for moving a class room to a phase.

use std::sync::Arc;

use tracing::info;

use super::{load_with_course, ClassRoomView};
use crate::domain::class_room::ClassRoomError;
use crate::domain::foundation::{ClassRoomId, CommandMetadata, PhaseId};
use crate::ports::{ClassRoomRepository, Clock, CourseRepository};

/// Command to change the phase of a class room.
#[derive(Debug, Clone)]
pub struct ChangePhaseCommand {
    pub class_room_id: ClassRoomId,
    pub to_phase_id: PhaseId,
}

/// Handler for phase changes.
pub struct ChangePhaseHandler {
    courses: Arc<dyn CourseRepository>,
    class_rooms: Arc<dyn ClassRoomRepository>,
    clock: Arc<dyn Clock>,
}

impl ChangePhaseHandler {
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
        cmd: ChangePhaseCommand,
        metadata: CommandMetadata,
    ) -> Result<ClassRoomView, ClassRoomError> {
        let (class_room, course) =
            load_with_course(self.class_rooms.as_ref(), self.courses.as_ref(), cmd.class_room_id)
                .await?;

        // Resolve against the course before anything is appended.
        let phase = course
            .phase(cmd.to_phase_id)
            .cloned()
            .ok_or(ClassRoomError::InvalidPhase {
                phase_id: cmd.to_phase_id,
                course_id: course.id(),
            })?;

        let now = self.clock.now();
        let transition = class_room.change_phase(metadata.user_id.clone(), phase, now);
        self.class_rooms.append(&transition).await?;

        info!(
            class_room_id = %cmd.class_room_id,
            phase_id = %cmd.to_phase_id,
            user_id = %metadata.user_id,
            timer = transition.appended[0].timer(),
            correlation_id = %metadata.correlation_id(),
            "Class room changed phase"
        );

        Ok(ClassRoomView::new(transition.class_room, course, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        at, math_course, metadata, FixedClock, MockClassRoomRepository, MockCourseRepository,
    };
    use crate::domain::class_room::{ClassRoom, Transition};
    use crate::domain::foundation::UserId;

    fn setup() -> (
        crate::application::handlers::test_support::MathCourse,
        Arc<MockClassRoomRepository>,
        Arc<FixedClock>,
        ChangePhaseHandler,
        ClassRoomId,
    ) {
        let math = math_course();
        let repo = Arc::new(MockClassRoomRepository::default());
        let room = ClassRoom::kick_off(&math.course, UserId::new("user1").unwrap(), at(0)).class_room;
        let id = room.id();
        repo.insert(room);
        let clock = Arc::new(FixedClock::at(0));
        let handler = ChangePhaseHandler::new(
            Arc::new(MockCourseRepository::with(vec![math.course.clone()])),
            repo.clone(),
            clock.clone(),
        );
        (math, repo, clock, handler, id)
    }

    #[tokio::test]
    async fn math_example_carries_timer_across_phases() {
        let (math, _repo, clock, handler, id) = setup();

        clock.set(5);
        let view = handler
            .handle(
                ChangePhaseCommand { class_room_id: id, to_phase_id: math.calculate.id() },
                metadata("user1"),
            )
            .await
            .unwrap();
        assert_eq!(view.class_room.events().iter().last().unwrap().timer(), 0);

        clock.set(15);
        let view = handler
            .handle(
                ChangePhaseCommand { class_room_id: id, to_phase_id: math.lobby.id() },
                metadata("user1"),
            )
            .await
            .unwrap();
        assert_eq!(view.class_room.events().iter().last().unwrap().timer(), 10);
        assert_eq!(view.current_phase(), Some(&math.lobby));
        assert_eq!(view.timer(), 10);
    }

    #[tokio::test]
    async fn foreign_phase_is_rejected_without_appending() {
        let (math, repo, _clock, handler, id) = setup();
        let foreign = PhaseId::new();

        let result = handler
            .handle(
                ChangePhaseCommand { class_room_id: id, to_phase_id: foreign },
                metadata("user1"),
            )
            .await;

        assert_eq!(
            result,
            Err(ClassRoomError::InvalidPhase {
                phase_id: foreign,
                course_id: math.course.id()
            })
        );
        assert_eq!(repo.appended_events(), 0);
        assert_eq!(repo.stored(id).unwrap().version(), 2);
    }

    #[tokio::test]
    async fn stale_snapshot_is_reported_as_conflict() {
        let (math, repo, _clock, handler, id) = setup();
        let stale = repo.stored(id).unwrap();

        handler
            .handle(
                ChangePhaseCommand { class_room_id: id, to_phase_id: math.calculate.id() },
                metadata("user1"),
            )
            .await
            .unwrap();

        let racing: Transition =
            stale.change_phase(UserId::new("user2").unwrap(), math.lobby.clone(), at(1));
        let result = repo.append(&racing).await.map_err(ClassRoomError::from);

        assert!(matches!(result, Err(ClassRoomError::Conflict(_))));
        assert_eq!(repo.stored(id).unwrap().version(), 3);
    }
}
