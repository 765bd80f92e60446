//! Course entity.

use super::phase::{validate_title, Phase};
use crate::domain::foundation::{CourseId, PhaseId, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named curriculum offering an ordered set of phases.
///
/// # Invariants
///
/// - `title` is 1-60 characters, non-empty
/// - `phases` contains no duplicate ids
/// - `default_phase`, when set, is one of `phases`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    title: String,
    phases: Vec<Phase>,
    default_phase: Option<PhaseId>,
}

impl Course {
    /// Creates a course.
    ///
    /// # Errors
    ///
    /// - `EmptyField`/`TooLong` for an invalid title
    /// - `InvalidValue` on `phases` if a phase id repeats
    /// - `InvalidValue` on `default_phase` if it is not one of `phases`
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        phases: Vec<Phase>,
        default_phase: Option<PhaseId>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        validate_title(&title)?;

        let mut seen = HashSet::with_capacity(phases.len());
        for phase in &phases {
            if !seen.insert(phase.id()) {
                return Err(ValidationError::invalid_value(
                    "phases",
                    format!("phase {} appears more than once", phase.id()),
                ));
            }
        }

        if let Some(default) = default_phase {
            if !seen.contains(&default) {
                return Err(ValidationError::invalid_value(
                    "default_phase",
                    format!("phase {} is not part of the course", default),
                ));
            }
        }

        Ok(Self {
            id,
            title,
            phases,
            default_phase,
        })
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Phases in catalogue order.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn default_phase_id(&self) -> Option<PhaseId> {
        self.default_phase
    }

    /// Resolves the default phase, if the course has one.
    pub fn default_phase(&self) -> Option<&Phase> {
        self.default_phase.and_then(|id| self.phase(id))
    }

    /// Looks up a phase belonging to this course.
    pub fn phase(&self, id: PhaseId) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id() == id)
    }

    pub fn has_phase(&self, id: PhaseId) -> bool {
        self.phase(id).is_some()
    }
}
