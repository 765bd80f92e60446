//! Phase entity.

use crate::domain::foundation::{PhaseId, ValidationError};
use serde::{Deserialize, Serialize};

/// Maximum length for phase and course titles.
pub const MAX_TITLE_LENGTH: usize = 60;

/// A named stage a class room can be in.
///
/// When `timer` is set, time spent in the phase accrues on the class
/// room's accumulated timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    id: PhaseId,
    title: String,
    timer: bool,
}

impl Phase {
    /// Creates a phase, validating the title.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is blank
    /// - `TooLong` if the title exceeds [`MAX_TITLE_LENGTH`] characters
    pub fn new(id: PhaseId, title: impl Into<String>, timer: bool) -> Result<Self, ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Self { id, title, timer })
    }

    pub fn id(&self) -> PhaseId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether elapsed time accrues while a class room sits in this phase.
    pub fn timer(&self) -> bool {
        self.timer
    }
}

pub(super) fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    let len = trimmed.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(ValidationError::too_long("title", MAX_TITLE_LENGTH, len));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_phase_keeps_fields() {
        let id = PhaseId::new();
        let phase = Phase::new(id, "Lobby", false).unwrap();
        assert_eq!(phase.id(), id);
        assert_eq!(phase.title(), "Lobby");
        assert!(!phase.timer());
    }

    #[test]
    fn new_phase_rejects_blank_title() {
        let result = Phase::new(PhaseId::new(), "   ", true);
        assert_eq!(result, Err(ValidationError::empty_field("title")));
    }

    #[test]
    fn new_phase_rejects_too_long_title() {
        let result = Phase::new(PhaseId::new(), "x".repeat(MAX_TITLE_LENGTH + 1), true);
        assert!(matches!(result, Err(ValidationError::TooLong { .. })));
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        let title = "é".repeat(MAX_TITLE_LENGTH);
        assert!(Phase::new(PhaseId::new(), title, false).is_ok());
    }

    #[test]
    fn phase_serializes_with_timer_flag() {
        let phase = Phase::new(PhaseId::new(), "Calculate", true).unwrap();
        let json = serde_json::to_value(&phase).unwrap();
        assert_eq!(json["title"], "Calculate");
        assert_eq!(json["timer"], true);
    }
}
