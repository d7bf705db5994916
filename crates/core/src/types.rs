use std::fmt;

use serde::{Deserialize, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Status IDs map to SMALLSERIAL in the `statuses` lookup table.
pub type StatusId = i16;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The composite natural key identifying one course section/offering.
///
/// Ideas, teams, and activities reference a group by matching all four
/// fields together; lookups never join on a subset of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupAffiliation {
    /// Subject code, e.g. `"CS101"`.
    pub subject_code: String,
    /// Group letter within the subject, e.g. `"A"`.
    pub group_letter: String,
    /// Academic period within the year, e.g. `"1"`.
    pub period: String,
    /// Calendar year, e.g. `2024`.
    pub year: i32,
}

impl GroupAffiliation {
    pub fn new(
        subject_code: impl Into<String>,
        group_letter: impl Into<String>,
        period: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            subject_code: subject_code.into(),
            group_letter: group_letter.into(),
            period: period.into(),
            year,
        }
    }

    /// Build an affiliation from the nullable column quartet stored on
    /// ideas and teams. Returns `None` unless all four fields are present.
    pub fn from_columns(
        subject_code: Option<String>,
        group_letter: Option<String>,
        period: Option<String>,
        year: Option<i32>,
    ) -> Option<Self> {
        Some(Self {
            subject_code: subject_code?,
            group_letter: group_letter?,
            period: period?,
            year: year?,
        })
    }
}

impl fmt::Display for GroupAffiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} {}/{}",
            self.subject_code, self.group_letter, self.year, self.period
        )
    }
}
