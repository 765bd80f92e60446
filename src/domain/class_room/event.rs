//! Class room event log.
//!
//! Events are immutable once created. The log is append-only and its
//! insertion order is the temporal order of the class room.

use crate::domain::course::Phase;
use crate::domain::foundation::{ClassRoomEventId, ClassRoomId, Timestamp, UserId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happened in a class room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    ChangePhase,
    Join,
    Leave,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::ChangePhase => "CHANGE_PHASE",
            EventAction::Join => "JOIN",
            EventAction::Leave => "LEAVE",
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CHANGE_PHASE" => Ok(EventAction::ChangePhase),
            "JOIN" => Ok(EventAction::Join),
            "LEAVE" => Ok(EventAction::Leave),
            other => Err(ValidationError::invalid_value(
                "action",
                format!("unknown event action '{}'", other),
            )),
        }
    }
}

/// One immutable entry of a class room's history.
///
/// `to_phase` holds a snapshot of the target phase and is present if and
/// only if `action` is [`EventAction::ChangePhase`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRoomEvent {
    id: ClassRoomEventId,
    class_room_id: ClassRoomId,
    action: EventAction,
    to_phase: Option<Phase>,
    user: Option<UserId>,
    created_at: Timestamp,
    timer: i64,
}

impl ClassRoomEvent {
    pub fn change_phase(
        class_room_id: ClassRoomId,
        phase: Phase,
        user: Option<UserId>,
        timer: i64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: ClassRoomEventId::new(),
            class_room_id,
            action: EventAction::ChangePhase,
            to_phase: Some(phase),
            user,
            created_at,
            timer,
        }
    }

    pub fn join(class_room_id: ClassRoomId, user: UserId, timer: i64, created_at: Timestamp) -> Self {
        Self::attendance(class_room_id, EventAction::Join, user, timer, created_at)
    }

    pub fn leave(class_room_id: ClassRoomId, user: UserId, timer: i64, created_at: Timestamp) -> Self {
        Self::attendance(class_room_id, EventAction::Leave, user, timer, created_at)
    }

    fn attendance(
        class_room_id: ClassRoomId,
        action: EventAction,
        user: UserId,
        timer: i64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: ClassRoomEventId::new(),
            class_room_id,
            action,
            to_phase: None,
            user: Some(user),
            created_at,
            timer,
        }
    }

    /// Rebuilds a stored event.
    ///
    /// # Errors
    ///
    /// `InvalidValue` on `to_phase` when the phase presence does not match
    /// the action.
    pub fn reconstitute(
        id: ClassRoomEventId,
        class_room_id: ClassRoomId,
        action: EventAction,
        to_phase: Option<Phase>,
        user: Option<UserId>,
        created_at: Timestamp,
        timer: i64,
    ) -> Result<Self, ValidationError> {
        let expects_phase = action == EventAction::ChangePhase;
        if expects_phase != to_phase.is_some() {
            return Err(ValidationError::invalid_value(
                "to_phase",
                format!("{} event {} has mismatched target phase", action, id),
            ));
        }

        Ok(Self {
            id,
            class_room_id,
            action,
            to_phase,
            user,
            created_at,
            timer,
        })
    }

    pub fn id(&self) -> ClassRoomEventId {
        self.id
    }

    pub fn class_room_id(&self) -> ClassRoomId {
        self.class_room_id
    }

    pub fn action(&self) -> EventAction {
        self.action
    }

    pub fn to_phase(&self) -> Option<&Phase> {
        self.to_phase.as_ref()
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Accumulated seconds carried by this event.
    pub fn timer(&self) -> i64 {
        self.timer
    }
}

/// Ordered, append-only sequence of class room events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog(Vec<ClassRoomEvent>);

impl EventLog {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a log from events already in insertion order.
    pub fn from_events(events: Vec<ClassRoomEvent>) -> Self {
        Self(events)
    }

    pub(crate) fn push(&mut self, event: ClassRoomEvent) {
        self.0.push(event);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassRoomEvent> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ClassRoomEvent] {
        &self.0
    }

    /// Most recent event carrying a target phase.
    ///
    /// JOIN and LEAVE entries are skipped; they record the timer but never
    /// serve as its baseline.
    pub fn last_phase_change(&self) -> Option<&ClassRoomEvent> {
        self.0.iter().rev().find(|e| e.to_phase.is_some())
    }

    /// Phase the class room currently sits in.
    pub fn current_phase(&self) -> Option<&Phase> {
        self.last_phase_change().and_then(|e| e.to_phase())
    }

    /// Accumulated timer as of `now`.
    ///
    /// Baseline of the last phase change, plus whole seconds elapsed since
    /// it when that phase is timed. Zero if no phase was ever entered.
    pub fn accumulated_timer(&self, now: &Timestamp) -> i64 {
        match self.last_phase_change() {
            None => 0,
            Some(event) => match event.to_phase() {
                Some(phase) if phase.timer() => {
                    event.timer + now.whole_seconds_since(&event.created_at)
                }
                _ => event.timer,
            },
        }
    }

    /// Number of events with `action` recorded for `user`.
    pub fn count_for(&self, user: &UserId, action: EventAction) -> usize {
        self.0
            .iter()
            .filter(|e| e.action == action && e.user.as_ref() == Some(user))
            .count()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a ClassRoomEvent;
    type IntoIter = std::slice::Iter<'a, ClassRoomEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
