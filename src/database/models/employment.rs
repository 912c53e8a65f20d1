use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Draft, Entity, SqlValue};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Employment {
    pub employment_id: i64,
    pub time_period: i64,
    pub employment_status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmploymentDraft {
    pub employment_id: Option<i64>,
    pub time_period: i64,
    pub employment_status: String,
}

impl Entity for Employment {
    const LABEL: &'static str = "Employment";
    const COLLECTION: &'static str = "Employments";
    const TABLE: &'static str = "employment";
    const ID_COLUMN: &'static str = "employment_id";
    const COLUMNS: &'static [&'static str] = &["time_period", "employment_status"];

    type Draft = EmploymentDraft;

    fn id(&self) -> i64 {
        self.employment_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.time_period.into(), self.employment_status.clone().into()]
    }
}

impl Draft for EmploymentDraft {
    fn id(&self) -> Option<i64> {
        self.employment_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.time_period.into(), self.employment_status.clone().into()]
    }
}
