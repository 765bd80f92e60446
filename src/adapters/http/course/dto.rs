//! Course response DTOs.

use serde::{Deserialize, Serialize};

use crate::application::handlers::CourseView;
use crate::domain::course::{Course, Phase};
use crate::domain::foundation::{ClassRoomId, CourseId, PhaseId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseResponse {
    pub id: PhaseId,
    pub title: String,
    pub timer: bool,
}

impl From<&Phase> for PhaseResponse {
    fn from(phase: &Phase) -> Self {
        Self {
            id: phase.id(),
            title: phase.title().to_string(),
            timer: phase.timer(),
        }
    }
}

/// Course as embedded in a class room response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseSummaryResponse {
    pub id: CourseId,
    pub title: String,
    pub phases: Vec<PhaseResponse>,
    pub default_phase: Option<PhaseId>,
}

impl From<&Course> for CourseSummaryResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id(),
            title: course.title().to_string(),
            phases: course.phases().iter().map(PhaseResponse::from).collect(),
            default_phase: course.default_phase_id(),
        }
    }
}

/// Course with the ids of its class rooms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseResponse {
    pub id: CourseId,
    pub title: String,
    pub phases: Vec<PhaseResponse>,
    pub default_phase: Option<PhaseId>,
    pub class_rooms: Vec<ClassRoomId>,
}

impl From<CourseView> for CourseResponse {
    fn from(view: CourseView) -> Self {
        let summary = CourseSummaryResponse::from(&view.course);
        Self {
            id: summary.id,
            title: summary.title,
            phases: summary.phases,
            default_phase: summary.default_phase,
            class_rooms: view.class_rooms,
        }
    }
}
