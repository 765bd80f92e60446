//! Class room request and response DTOs.

use serde::{Deserialize, Serialize};

use crate::adapters::http::course::{CourseSummaryResponse, PhaseResponse};
use crate::application::handlers::ClassRoomView;
use crate::domain::class_room::{ClassRoomEvent, EventAction};
use crate::domain::foundation::{ClassRoomEventId, ClassRoomId, Timestamp, UserId};

/// Request body for kicking off a class room.
///
/// Fields are optional so that a missing id surfaces as a 400 with a
/// structured body rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KickOffRequest {
    pub course_id: Option<String>,
}

/// Request body for a phase change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangePhaseRequest {
    pub to_phase_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: UserId,
}

impl From<&UserId> for UserResponse {
    fn from(id: &UserId) -> Self {
        Self { id: id.clone() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventResponse {
    pub id: ClassRoomEventId,
    pub to_phase: Option<PhaseResponse>,
    pub action: EventAction,
    pub created_at: Timestamp,
    pub user: Option<UserResponse>,
    pub timer: i64,
}

impl From<&ClassRoomEvent> for EventResponse {
    fn from(event: &ClassRoomEvent) -> Self {
        Self {
            id: event.id(),
            to_phase: event.to_phase().map(PhaseResponse::from),
            action: event.action(),
            created_at: *event.created_at(),
            user: event.user().map(UserResponse::from),
            timer: event.timer(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassRoomResponse {
    pub id: ClassRoomId,
    pub course: CourseSummaryResponse,
    pub events: Vec<EventResponse>,
    pub attending: Vec<UserResponse>,
    pub current_phase: Option<PhaseResponse>,
    /// Accumulated seconds as of the response.
    pub timer: i64,
}

impl From<ClassRoomView> for ClassRoomResponse {
    fn from(view: ClassRoomView) -> Self {
        Self {
            id: view.class_room.id(),
            course: CourseSummaryResponse::from(&view.course),
            events: view.class_room.events().iter().map(EventResponse::from).collect(),
            attending: view.class_room.attending().iter().map(UserResponse::from).collect(),
            current_phase: view.current_phase().map(PhaseResponse::from),
            timer: view.timer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::class_room::ClassRoom;
    use crate::domain::course::{Course, Phase};
    use crate::domain::foundation::{CourseId, PhaseId};

    #[test]
    fn kick_off_request_tolerates_missing_course() {
        let req: KickOffRequest = serde_json::from_str("{}").unwrap();
        assert!(req.course_id.is_none());
    }

    #[test]
    fn change_phase_request_deserializes() {
        let req: ChangePhaseRequest = serde_json::from_str(r#"{"to_phase_id":"abc"}"#).unwrap();
        assert_eq!(req.to_phase_id.as_deref(), Some("abc"));
    }

    #[test]
    fn class_room_response_has_documented_shape() {
        let lobby = Phase::new(PhaseId::new(), "Lobby", false).unwrap();
        let course = Course::new(CourseId::new(), "Math", vec![lobby.clone()], Some(lobby.id())).unwrap();
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let room = ClassRoom::kick_off(&course, UserId::new("user1").unwrap(), now).class_room;

        let json = serde_json::to_value(ClassRoomResponse::from(ClassRoomView::new(room, course, now)))
            .unwrap();

        assert_eq!(json["course"]["title"], "Math");
        assert_eq!(json["events"][0]["action"], "CHANGE_PHASE");
        assert_eq!(json["events"][0]["to_phase"]["title"], "Lobby");
        assert_eq!(json["events"][0]["user"]["id"], "user1");
        assert_eq!(json["events"][1]["action"], "JOIN");
        assert!(json["events"][1]["to_phase"].is_null());
        assert_eq!(json["events"][1]["timer"], 0);
        assert_eq!(json["attending"][0]["id"], "user1");
        assert_eq!(json["current_phase"]["title"], "Lobby");
        assert_eq!(json["timer"], 0);
    }
}
