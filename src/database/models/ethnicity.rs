use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Draft, Entity, SqlValue};

/// Ethnic breakdown of trainees for one period, as whole percentages
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Ethnicity {
    pub ethnicity_id: i64,
    pub time_period: i64,
    pub pct_total_ethnic_asian: i64,
    pub pct_total_ethnic_black: i64,
    pub pct_total_ethnic_white: i64,
    pub pct_total_ethnic_mixed_ethnicity: i64,
    pub pct_total_ethnic_other: i64,
    pub pct_total_ethnic_unknown: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EthnicityDraft {
    pub ethnicity_id: Option<i64>,
    pub time_period: i64,
    pub pct_total_ethnic_asian: i64,
    pub pct_total_ethnic_black: i64,
    pub pct_total_ethnic_white: i64,
    pub pct_total_ethnic_mixed_ethnicity: i64,
    pub pct_total_ethnic_other: i64,
    pub pct_total_ethnic_unknown: i64,
}

impl Entity for Ethnicity {
    const LABEL: &'static str = "Ethnicity";
    const COLLECTION: &'static str = "Ethnicities";
    const TABLE: &'static str = "ethnicity";
    const ID_COLUMN: &'static str = "ethnicity_id";
    const COLUMNS: &'static [&'static str] = &[
        "time_period",
        "pct_total_ethnic_asian",
        "pct_total_ethnic_black",
        "pct_total_ethnic_white",
        "pct_total_ethnic_mixed_ethnicity",
        "pct_total_ethnic_other",
        "pct_total_ethnic_unknown",
    ];

    type Draft = EthnicityDraft;

    fn id(&self) -> i64 {
        self.ethnicity_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.time_period.into(),
            self.pct_total_ethnic_asian.into(),
            self.pct_total_ethnic_black.into(),
            self.pct_total_ethnic_white.into(),
            self.pct_total_ethnic_mixed_ethnicity.into(),
            self.pct_total_ethnic_other.into(),
            self.pct_total_ethnic_unknown.into(),
        ]
    }
}

impl Draft for EthnicityDraft {
    fn id(&self) -> Option<i64> {
        self.ethnicity_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.time_period.into(),
            self.pct_total_ethnic_asian.into(),
            self.pct_total_ethnic_black.into(),
            self.pct_total_ethnic_white.into(),
            self.pct_total_ethnic_mixed_ethnicity.into(),
            self.pct_total_ethnic_other.into(),
            self.pct_total_ethnic_unknown.into(),
        ]
    }
}
