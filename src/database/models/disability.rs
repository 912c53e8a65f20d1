use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Draft, Entity, SqlValue};

/// Stored in the `disability_group` table
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Disability {
    pub disability_id: i64,
    pub time_period: i64,
    pub pct_total_disability: i64,
    pub pct_total_nondisability: i64,
    pub pct_total_disability_unknown: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisabilityDraft {
    pub disability_id: Option<i64>,
    pub time_period: i64,
    pub pct_total_disability: i64,
    pub pct_total_nondisability: i64,
    pub pct_total_disability_unknown: i64,
}

impl Entity for Disability {
    const LABEL: &'static str = "Disability";
    const COLLECTION: &'static str = "Disabilities";
    const TABLE: &'static str = "disability_group";
    const ID_COLUMN: &'static str = "disability_id";
    const COLUMNS: &'static [&'static str] = &[
        "time_period",
        "pct_total_disability",
        "pct_total_nondisability",
        "pct_total_disability_unknown",
    ];

    type Draft = DisabilityDraft;

    fn id(&self) -> i64 {
        self.disability_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.time_period.into(),
            self.pct_total_disability.into(),
            self.pct_total_nondisability.into(),
            self.pct_total_disability_unknown.into(),
        ]
    }
}

impl Draft for DisabilityDraft {
    fn id(&self) -> Option<i64> {
        self.disability_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.time_period.into(),
            self.pct_total_disability.into(),
            self.pct_total_nondisability.into(),
            self.pct_total_disability_unknown.into(),
        ]
    }
}
