use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Draft, Entity, SqlValue};

/// Share of trainees under 25 and 25-or-over for one period
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AgeGroup {
    pub age_group_id: i64,
    pub time_period: i64,
    pub pct_total_age_u25: i64,
    pub pct_total_age_25andover: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgeGroupDraft {
    pub age_group_id: Option<i64>,
    pub time_period: i64,
    pub pct_total_age_u25: i64,
    pub pct_total_age_25andover: i64,
}

impl Entity for AgeGroup {
    const LABEL: &'static str = "Age_group";
    const COLLECTION: &'static str = "Age_groups";
    const TABLE: &'static str = "age_group";
    const ID_COLUMN: &'static str = "age_group_id";
    const COLUMNS: &'static [&'static str] =
        &["time_period", "pct_total_age_u25", "pct_total_age_25andover"];

    type Draft = AgeGroupDraft;

    fn id(&self) -> i64 {
        self.age_group_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.time_period.into(),
            self.pct_total_age_u25.into(),
            self.pct_total_age_25andover.into(),
        ]
    }
}

impl Draft for AgeGroupDraft {
    fn id(&self) -> Option<i64> {
        self.age_group_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.time_period.into(),
            self.pct_total_age_u25.into(),
            self.pct_total_age_25andover.into(),
        ]
    }
}
