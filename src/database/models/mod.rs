//! Entity records and their field mappings.
//!
//! Each entity is three plain types: the stored record (`FromRow` + `Serialize`),
//! a draft accepted on create, and (for updatable entities) a patch of optional
//! fields merged onto an existing record. Column order in `Entity::COLUMNS`
//! matches the order of `values()` on both the record and its draft.

pub mod age_group;
pub mod course_level;
pub mod disability;
pub mod employment;
pub mod ethnicity;
pub mod feedback;
pub mod gender;
pub mod teacher;
pub mod user;

pub use age_group::{AgeGroup, AgeGroupDraft};
pub use course_level::{CourseLevel, CourseLevelDraft};
pub use disability::{Disability, DisabilityDraft};
pub use employment::{Employment, EmploymentDraft};
pub use ethnicity::{Ethnicity, EthnicityDraft};
pub use feedback::{Feedback, FeedbackDraft};
pub use gender::{Gender, GenderDraft};
pub use teacher::{Teacher, TeacherDraft, TeacherPatch};
pub use user::{User, UserDraft, UserInput, UserPatch};

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow};

/// Patch field helper: an absent key stays `None` (via `#[serde(default)]`),
/// while an explicit `null` is rejected because the column is not nullable.
pub(crate) fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A single bindable column value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Null,
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// Foreign key checked by the application before insert
#[derive(Debug, Clone, Copy)]
pub struct Reference {
    pub column: &'static str,
    pub table: &'static str,
    pub id_column: &'static str,
}

/// A persisted record kind
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + 'static {
    /// Name used in response messages, e.g. "Age_group"
    const LABEL: &'static str;
    /// Route segment, e.g. "Age_groups"
    const COLLECTION: &'static str;
    const TABLE: &'static str;
    const ID_COLUMN: &'static str;
    /// Writable columns, excluding the id
    const COLUMNS: &'static [&'static str];
    /// Columns that must be unique across the table
    const UNIQUE: &'static [&'static str] = &[];
    const REFERENCES: &'static [Reference] = &[];

    type Draft: Draft;

    fn id(&self) -> i64;

    /// Current values for `COLUMNS`, in order
    fn values(&self) -> Vec<SqlValue>;
}

/// A decoded, not yet persisted record
pub trait Draft: Send + Sync + 'static {
    /// Client-chosen id, if any; the store assigns one otherwise
    fn id(&self) -> Option<i64>;

    /// Values for the entity's `COLUMNS`, in order
    fn values(&self) -> Vec<SqlValue>;
}

/// Entities that support partial updates
pub trait Patchable: Entity {
    type Patch: Send;

    /// Id carried in the patch body, if the client sent one
    fn patch_id(patch: &Self::Patch) -> Option<i64>;

    fn apply(&mut self, patch: Self::Patch);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_aligned<T: Entity>(record: &T, draft: &T::Draft) {
        assert_eq!(record.values().len(), T::COLUMNS.len(), "{} record", T::LABEL);
        assert_eq!(draft.values().len(), T::COLUMNS.len(), "{} draft", T::LABEL);
        for column in T::UNIQUE {
            assert!(T::COLUMNS.contains(column), "{} unique column {}", T::LABEL, column);
        }
        for reference in T::REFERENCES {
            assert!(T::COLUMNS.contains(&reference.column));
        }
    }

    #[test]
    fn columns_and_values_line_up() {
        assert_aligned(
            &User { user_id: 1, email: "a@b.c".into(), password_hash: "h".into(), user_name: "a".into() },
            &UserDraft { user_id: None, email: "a@b.c".into(), password_hash: "h".into(), user_name: "a".into() },
        );
        assert_aligned(
            &Feedback { feedback_id: 1, feedback_time: "t".into(), feedback_content: None, user_id: 1 },
            &FeedbackDraft { feedback_id: None, feedback_time: "t".into(), feedback_content: None, user_id: 1 },
        );
        assert_aligned(
            &AgeGroup { age_group_id: 1, time_period: 1, pct_total_age_u25: 1, pct_total_age_25andover: 1 },
            &AgeGroupDraft { age_group_id: None, time_period: 1, pct_total_age_u25: 1, pct_total_age_25andover: 1 },
        );
        assert_aligned(
            &Gender { gender_id: 1, time_period: 1, pct_total_sex_m: 1, pct_total_sex_f: 1 },
            &GenderDraft { gender_id: None, time_period: 1, pct_total_sex_m: 1, pct_total_sex_f: 1 },
        );
        assert_aligned(
            &Ethnicity {
                ethnicity_id: 1,
                time_period: 1,
                pct_total_ethnic_asian: 1,
                pct_total_ethnic_black: 1,
                pct_total_ethnic_white: 1,
                pct_total_ethnic_mixed_ethnicity: 1,
                pct_total_ethnic_other: 1,
                pct_total_ethnic_unknown: 1,
            },
            &EthnicityDraft {
                ethnicity_id: None,
                time_period: 1,
                pct_total_ethnic_asian: 1,
                pct_total_ethnic_black: 1,
                pct_total_ethnic_white: 1,
                pct_total_ethnic_mixed_ethnicity: 1,
                pct_total_ethnic_other: 1,
                pct_total_ethnic_unknown: 1,
            },
        );
        assert_aligned(
            &Employment { employment_id: 1, time_period: 1, employment_status: "s".into() },
            &EmploymentDraft { employment_id: None, time_period: 1, employment_status: "s".into() },
        );
        assert_aligned(
            &CourseLevel { course_level_id: 1, time_period: 1, course_level_recoded: "c".into() },
            &CourseLevelDraft { course_level_id: None, time_period: 1, course_level_recoded: "c".into() },
        );
        assert_aligned(
            &Disability {
                disability_id: 1,
                time_period: 1,
                pct_total_disability: 1,
                pct_total_nondisability: 1,
                pct_total_disability_unknown: 1,
            },
            &DisabilityDraft {
                disability_id: None,
                time_period: 1,
                pct_total_disability: 1,
                pct_total_nondisability: 1,
                pct_total_disability_unknown: 1,
            },
        );
        assert_aligned(
            &Teacher { teacher_id: 1, time_period: 1, qts_status: "Total".into(), n_total: 1 },
            &TeacherDraft { teacher_id: None, time_period: 1, qts_status: "Total".into(), n_total: 1 },
        );
    }

    #[test]
    fn optional_values_become_null() {
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(5_i64)), SqlValue::Integer(5));
    }
}
