//! ClassRoom aggregate.
//!
//! A class room is one live run of a course: who attends, and the history of
//! joins, leaves and phase changes. Operations never mutate in place; each
//! returns a [`Transition`] holding the next snapshot and the events the
//! caller must persist.

use super::event::{ClassRoomEvent, EventAction, EventLog};
use crate::domain::course::{Course, Phase};
use crate::domain::foundation::{ClassRoomId, CourseId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Result of a class room operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Snapshot after the operation.
    pub class_room: ClassRoom,

    /// Events produced by the operation, in order.
    pub appended: Vec<ClassRoomEvent>,

    /// Number of events the snapshot was derived from.
    ///
    /// Persistence rejects the transition if the stored log has moved on.
    pub base_version: u64,
}

/// ClassRoom aggregate.
///
/// # Invariants
///
/// - `course_id` never changes after kick-off
/// - `attending` has no duplicates and keeps join order
/// - `events` only grows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRoom {
    id: ClassRoomId,
    course_id: CourseId,
    attending: Vec<UserId>,
    events: EventLog,
    created_at: Timestamp,
}

impl ClassRoom {
    /// Starts a class room for `course` with `user` attending.
    ///
    /// With a default phase the log starts with CHANGE_PHASE to it, then the
    /// JOIN of `user`. Both carry a zero timer.
    pub fn kick_off(course: &Course, user: UserId, now: Timestamp) -> Transition {
        let mut class_room = Self {
            id: ClassRoomId::new(),
            course_id: course.id(),
            attending: Vec::new(),
            events: EventLog::new(),
            created_at: now,
        };

        let mut appended = Vec::with_capacity(2);
        if let Some(phase) = course.default_phase() {
            appended.push(ClassRoomEvent::change_phase(
                class_room.id,
                phase.clone(),
                Some(user.clone()),
                0,
                now,
            ));
        }
        appended.push(ClassRoomEvent::join(class_room.id, user.clone(), 0, now));

        class_room.attending.push(user);
        for event in &appended {
            class_room.events.push(event.clone());
        }

        Transition {
            class_room,
            appended,
            base_version: 0,
        }
    }

    /// Rebuilds a class room from persistence (no validation).
    pub fn reconstitute(
        id: ClassRoomId,
        course_id: CourseId,
        attending: Vec<UserId>,
        events: EventLog,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            course_id,
            attending,
            events,
            created_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> ClassRoomId {
        self.id
    }

    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    /// Attending users in join order.
    pub fn attending(&self) -> &[UserId] {
        &self.attending
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Number of events in the log.
    pub fn version(&self) -> u64 {
        self.events.len() as u64
    }

    pub fn is_attending(&self, user: &UserId) -> bool {
        self.attending.contains(user)
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.events.current_phase()
    }

    pub fn accumulated_timer(&self, now: &Timestamp) -> i64 {
        self.events.accumulated_timer(now)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds `user` to the attendance and records a JOIN.
    ///
    /// A user already attending is not duplicated, but the JOIN is still
    /// recorded.
    pub fn join(&self, user: UserId, now: Timestamp) -> Transition {
        let timer = self.accumulated_timer(&now);
        self.apply(ClassRoomEvent::join(self.id, user, timer, now))
    }

    /// Removes `user` from the attendance and records a LEAVE.
    ///
    /// Leaving without attending still records the LEAVE.
    pub fn leave(&self, user: UserId, now: Timestamp) -> Transition {
        let timer = self.accumulated_timer(&now);
        self.apply(ClassRoomEvent::leave(self.id, user, timer, now))
    }

    /// Moves the class room to `phase`.
    ///
    /// `phase` must already be resolved against the class room's course.
    pub fn change_phase(&self, user: UserId, phase: Phase, now: Timestamp) -> Transition {
        let timer = self.accumulated_timer(&now);
        self.apply(ClassRoomEvent::change_phase(
            self.id,
            phase,
            Some(user),
            timer,
            now,
        ))
    }

    fn apply(&self, event: ClassRoomEvent) -> Transition {
        let mut next = self.clone();

        if let Some(user) = event.user() {
            match event.action() {
                EventAction::Join => {
                    if !next.attending.contains(user) {
                        next.attending.push(user.clone());
                    }
                }
                EventAction::Leave => next.attending.retain(|u| u != user),
                EventAction::ChangePhase => {}
            }
        }
        next.events.push(event.clone());

        Transition {
            class_room: next,
            appended: vec![event],
            base_version: self.version(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PhaseId;

    struct Math {
        course: Course,
        lobby: Phase,
        calculate: Phase,
    }

    fn math() -> Math {
        let lobby = Phase::new(PhaseId::new(), "Lobby", false).unwrap();
        let calculate = Phase::new(PhaseId::new(), "Calculate", true).unwrap();
        let course = Course::new(
            CourseId::new(),
            "Math",
            vec![lobby.clone(), calculate.clone()],
            Some(lobby.id()),
        )
        .unwrap();
        Math {
            course,
            lobby,
            calculate,
        }
    }

    fn user(name: &str) -> UserId {
        UserId::new(name).unwrap()
    }

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000 + secs)
    }

    // Kick-off tests

    #[test]
    fn kick_off_with_default_phase_records_phase_then_join() {
        let math = math();
        let t = ClassRoom::kick_off(&math.course, user("user1"), at(0));

        let actions: Vec<_> = t.class_room.events().iter().map(|e| e.action()).collect();
        assert_eq!(actions, vec![EventAction::ChangePhase, EventAction::Join]);
        assert!(t.class_room.events().iter().all(|e| e.timer() == 0));
        assert_eq!(t.class_room.current_phase(), Some(&math.lobby));
        assert_eq!(t.appended.len(), 2);
        assert_eq!(t.base_version, 0);
    }

    #[test]
    fn kick_off_phase_event_carries_acting_user() {
        let math = math();
        let t = ClassRoom::kick_off(&math.course, user("user1"), at(0));
        assert_eq!(t.appended[0].user(), Some(&user("user1")));
    }

    #[test]
    fn kick_off_without_default_phase_only_joins() {
        let course = Course::new(CourseId::new(), "Art", vec![], None).unwrap();
        let t = ClassRoom::kick_off(&course, user("user1"), at(0));

        assert_eq!(t.appended.len(), 1);
        assert_eq!(t.appended[0].action(), EventAction::Join);
        assert!(t.class_room.current_phase().is_none());
        assert_eq!(t.class_room.attending(), &[user("user1")]);
    }

    // Attendance tests

    #[test]
    fn join_then_leave_removes_user() {
        let course = Course::new(CourseId::new(), "Art", vec![], None).unwrap();
        let room = ClassRoom::kick_off(&course, user("host"), at(0)).class_room;

        let joined = room.join(user("user2"), at(1)).class_room;
        let left = joined.leave(user("user2"), at(2)).class_room;

        assert!(!left.is_attending(&user("user2")));
        let tail: Vec<_> = left.events().iter().skip(1).map(|e| e.action()).collect();
        assert_eq!(tail, vec![EventAction::Join, EventAction::Leave]);
    }

    #[test]
    fn join_twice_keeps_single_membership_but_logs_both() {
        let math = math();
        let room = ClassRoom::kick_off(&math.course, user("user1"), at(0)).class_room;
        let again = room.join(user("user1"), at(3)).class_room;

        assert_eq!(again.attending(), &[user("user1")]);
        assert_eq!(again.events().count_for(&user("user1"), EventAction::Join), 2);
    }

    #[test]
    fn leave_without_attending_still_logs() {
        let math = math();
        let room = ClassRoom::kick_off(&math.course, user("user1"), at(0)).class_room;
        let t = room.leave(user("stranger"), at(1));

        assert_eq!(t.class_room.attending(), &[user("user1")]);
        assert_eq!(t.appended[0].action(), EventAction::Leave);
    }

    #[test]
    fn attendance_keeps_join_order() {
        let math = math();
        let room = ClassRoom::kick_off(&math.course, user("a"), at(0)).class_room;
        let room = room.join(user("b"), at(1)).class_room;
        let room = room.join(user("c"), at(2)).class_room;
        let room = room.leave(user("b"), at(3)).class_room;

        assert_eq!(room.attending(), &[user("a"), user("c")]);
    }

    // Timer tests

    #[test]
    fn math_example_accumulates_only_in_timed_phase() {
        let math = math();
        let room = ClassRoom::kick_off(&math.course, user("user1"), at(0)).class_room;

        let t = room.change_phase(user("user1"), math.calculate.clone(), at(5));
        assert_eq!(t.appended[0].timer(), 0);
        assert_eq!(t.appended[0].to_phase(), Some(&math.calculate));

        let t = t
            .class_room
            .change_phase(user("user1"), math.lobby.clone(), at(15));
        assert_eq!(t.appended[0].timer(), 10);

        // Frozen while in Lobby.
        assert_eq!(t.class_room.accumulated_timer(&at(500)), 10);
    }

    #[test]
    fn returning_to_timed_phase_resumes_from_baseline() {
        let math = math();
        let room = ClassRoom::kick_off(&math.course, user("user1"), at(0)).class_room;
        let room = room
            .change_phase(user("user1"), math.calculate.clone(), at(0))
            .class_room;
        let room = room
            .change_phase(user("user1"), math.lobby.clone(), at(10))
            .class_room;
        let room = room
            .change_phase(user("user1"), math.calculate.clone(), at(100))
            .class_room;

        assert_eq!(room.accumulated_timer(&at(104)), 14);
    }

    #[test]
    fn changing_to_same_timed_phase_keeps_accruing() {
        let math = math();
        let room = ClassRoom::kick_off(&math.course, user("user1"), at(0)).class_room;
        let room = room
            .change_phase(user("user1"), math.calculate.clone(), at(0))
            .class_room;
        let t = room.change_phase(user("user1"), math.calculate.clone(), at(6));

        assert_eq!(t.appended[0].timer(), 6);
        assert_eq!(t.class_room.accumulated_timer(&at(9)), 9);
    }

    #[test]
    fn join_and_leave_are_stamped_with_running_timer() {
        let math = math();
        let room = ClassRoom::kick_off(&math.course, user("user1"), at(0)).class_room;
        let room = room
            .change_phase(user("user1"), math.calculate.clone(), at(0))
            .class_room;

        let t = room.join(user("user2"), at(4));
        assert_eq!(t.appended[0].timer(), 4);

        let t = t.class_room.leave(user("user2"), at(7));
        assert_eq!(t.appended[0].timer(), 7);
        assert_eq!(t.class_room.accumulated_timer(&at(7)), 7);
    }

    #[test]
    fn transitions_report_base_version() {
        let math = math();
        let room = ClassRoom::kick_off(&math.course, user("user1"), at(0)).class_room;
        let t = room.join(user("user2"), at(1));

        assert_eq!(t.base_version, 2);
        assert_eq!(t.class_room.version(), 3);
        assert_eq!(room.version(), 2);
    }
}
