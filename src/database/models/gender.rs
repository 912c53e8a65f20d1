use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Draft, Entity, SqlValue};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Gender {
    pub gender_id: i64,
    pub time_period: i64,
    pub pct_total_sex_m: i64,
    pub pct_total_sex_f: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenderDraft {
    pub gender_id: Option<i64>,
    pub time_period: i64,
    pub pct_total_sex_m: i64,
    pub pct_total_sex_f: i64,
}

impl Entity for Gender {
    const LABEL: &'static str = "Gender";
    const COLLECTION: &'static str = "Genders";
    const TABLE: &'static str = "gender";
    const ID_COLUMN: &'static str = "gender_id";
    const COLUMNS: &'static [&'static str] = &["time_period", "pct_total_sex_m", "pct_total_sex_f"];

    type Draft = GenderDraft;

    fn id(&self) -> i64 {
        self.gender_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.time_period.into(),
            self.pct_total_sex_m.into(),
            self.pct_total_sex_f.into(),
        ]
    }
}

impl Draft for GenderDraft {
    fn id(&self) -> Option<i64> {
        self.gender_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.time_period.into(),
            self.pct_total_sex_m.into(),
            self.pct_total_sex_f.into(),
        ]
    }
}
