use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Draft, Entity, SqlValue};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CourseLevel {
    pub course_level_id: i64,
    pub time_period: i64,
    pub course_level_recoded: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseLevelDraft {
    pub course_level_id: Option<i64>,
    pub time_period: i64,
    pub course_level_recoded: String,
}

impl Entity for CourseLevel {
    const LABEL: &'static str = "Course_level";
    const COLLECTION: &'static str = "Course_levels";
    const TABLE: &'static str = "course_level";
    const ID_COLUMN: &'static str = "course_level_id";
    const COLUMNS: &'static [&'static str] = &["time_period", "course_level_recoded"];

    type Draft = CourseLevelDraft;

    fn id(&self) -> i64 {
        self.course_level_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.time_period.into(), self.course_level_recoded.clone().into()]
    }
}

impl Draft for CourseLevelDraft {
    fn id(&self) -> Option<i64> {
        self.course_level_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.time_period.into(), self.course_level_recoded.clone().into()]
    }
}
