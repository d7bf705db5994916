//! Input payload for turning an approved idea into a project.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;

/// Maximum length for the free-text project description fields.
pub const MAX_FIELD_LEN: usize = 150;

/// Caller-supplied details for `create_project_from_idea`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectDetails {
    /// Research line the project belongs to. Required.
    #[validate(length(min = 1, max = 150))]
    pub research_line: String,

    /// Comma-delimited technology list. Optional.
    #[validate(length(max = 150))]
    pub technologies: Option<String>,

    /// Comma-delimited keywords. Optional.
    #[validate(length(max = 150))]
    pub keywords: Option<String>,
}

impl ProjectDetails {
    /// Validate field lengths, mapping failures to [`CoreError::Validation`].
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(research_line: &str) -> ProjectDetails {
        ProjectDetails {
            research_line: research_line.to_string(),
            technologies: None,
            keywords: None,
        }
    }

    #[test]
    fn test_valid_details_pass() {
        assert!(details("Software engineering").check().is_ok());
    }

    #[test]
    fn test_empty_research_line_fails() {
        assert!(details("").check().is_err());
    }

    #[test]
    fn test_overlong_research_line_fails() {
        assert!(details(&"x".repeat(MAX_FIELD_LEN + 1)).check().is_err());
    }

    #[test]
    fn test_overlong_technologies_fail() {
        let d = ProjectDetails {
            research_line: "IoT".to_string(),
            technologies: Some("t".repeat(MAX_FIELD_LEN + 1)),
            keywords: None,
        };
        assert!(d.check().is_err());
    }

    #[test]
    fn test_boundary_length_passes() {
        assert!(details(&"x".repeat(MAX_FIELD_LEN)).check().is_ok());
    }
}
