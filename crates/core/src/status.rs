//! Status-name and review-action vocabulary.
//!
//! Status values live in the `statuses` lookup table and are resolved by
//! exact name at runtime; the names below are the ones the workflow engine
//! branches on. The table may carry additional institution-specific names
//! without code changes; the engine simply never routes to them.

/// Idea sits in the proposal bank, unassigned to any group or owner.
pub const STATUS_LIBRE: &str = "LIBRE";

/// Idea is awaiting its first review, or was re-adopted and awaits review.
pub const STATUS_REVISION: &str = "REVISION";

/// Reviewer requested corrections; the owner must respond.
pub const STATUS_STAND_BY: &str = "STAND_BY";

/// Idea (or the idea behind a project) passed review.
pub const STATUS_APROBADO: &str = "APROBADO";

/// Idea was rejected outright at the idea stage.
pub const STATUS_RECHAZADO: &str = "RECHAZADO";

/// Project work is in progress.
pub const STATUS_EN_CURSO: &str = "EN_CURSO";

/// Project was picked up from the proposal bank by a new team.
pub const STATUS_SELECCIONADO: &str = "SELECCIONADO";

/// Project received its final grade for the current attempt.
pub const STATUS_CALIFICADO: &str = "CALIFICADO";

/// Every status name the workflow engine branches on.
pub const WORKFLOW_STATUSES: &[&str] = &[
    STATUS_LIBRE,
    STATUS_REVISION,
    STATUS_STAND_BY,
    STATUS_APROBADO,
    STATUS_RECHAZADO,
    STATUS_EN_CURSO,
    STATUS_SELECCIONADO,
    STATUS_CALIFICADO,
];

// ---------------------------------------------------------------------------
// Review actions
// ---------------------------------------------------------------------------

/// Wire value for an unconditional approval.
pub const ACTION_APROBAR: &str = "Aprobar";

/// Wire value for approval pending corrections.
pub const ACTION_APROBAR_CON_OBSERVACION: &str = "Aprobar_Con_Observacion";

/// Wire value for rejection.
pub const ACTION_RECHAZAR: &str = "Rechazar";

/// A reviewer's decision on an idea or a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    ApproveWithObservations,
    Reject,
}

impl ReviewAction {
    /// Parse the wire value used by callers. Returns `None` for anything
    /// outside the three accepted values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            ACTION_APROBAR => Some(Self::Approve),
            ACTION_APROBAR_CON_OBSERVACION => Some(Self::ApproveWithObservations),
            ACTION_RECHAZAR => Some(Self::Reject),
            _ => None,
        }
    }

    /// The wire value for this action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => ACTION_APROBAR,
            Self::ApproveWithObservations => ACTION_APROBAR_CON_OBSERVACION,
            Self::Reject => ACTION_RECHAZAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_the_three_wire_values() {
        assert_eq!(ReviewAction::parse("Aprobar"), Some(ReviewAction::Approve));
        assert_eq!(
            ReviewAction::parse("Aprobar_Con_Observacion"),
            Some(ReviewAction::ApproveWithObservations)
        );
        assert_eq!(ReviewAction::parse("Rechazar"), Some(ReviewAction::Reject));
    }

    #[test]
    fn test_parse_rejects_unknown_and_empty_values() {
        assert_eq!(ReviewAction::parse("aprobar"), None);
        assert_eq!(ReviewAction::parse("Approve"), None);
        assert_eq!(ReviewAction::parse(""), None);
    }

    #[test]
    fn test_round_trip_through_wire_value() {
        for action in [
            ReviewAction::Approve,
            ReviewAction::ApproveWithObservations,
            ReviewAction::Reject,
        ] {
            assert_eq!(ReviewAction::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn test_workflow_statuses_are_distinct() {
        let mut names: Vec<&str> = WORKFLOW_STATUSES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), WORKFLOW_STATUSES.len());
    }
}
