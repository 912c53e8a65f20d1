use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{non_null, Draft, Entity, Patchable, SqlValue};

/// Trainee head count for one period and QTS outcome
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Teacher {
    pub teacher_id: i64,
    pub time_period: i64,
    pub qts_status: String,
    pub n_total: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeacherDraft {
    pub teacher_id: Option<i64>,
    pub time_period: i64,
    pub qts_status: String,
    pub n_total: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeacherPatch {
    #[serde(default, deserialize_with = "non_null")]
    pub teacher_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub time_period: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub qts_status: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub n_total: Option<i64>,
}

impl Entity for Teacher {
    const LABEL: &'static str = "Teacher";
    const COLLECTION: &'static str = "Teachers";
    const TABLE: &'static str = "teacher";
    const ID_COLUMN: &'static str = "teacher_id";
    const COLUMNS: &'static [&'static str] = &["time_period", "qts_status", "n_total"];

    type Draft = TeacherDraft;

    fn id(&self) -> i64 {
        self.teacher_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.time_period.into(),
            self.qts_status.clone().into(),
            self.n_total.into(),
        ]
    }
}

impl Draft for TeacherDraft {
    fn id(&self) -> Option<i64> {
        self.teacher_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.time_period.into(),
            self.qts_status.clone().into(),
            self.n_total.into(),
        ]
    }
}

impl Patchable for Teacher {
    type Patch = TeacherPatch;

    fn patch_id(patch: &TeacherPatch) -> Option<i64> {
        patch.teacher_id
    }

    fn apply(&mut self, patch: TeacherPatch) {
        if let Some(time_period) = patch.time_period {
            self.time_period = time_period;
        }
        if let Some(qts_status) = patch.qts_status {
            self.qts_status = qts_status;
        }
        if let Some(n_total) = patch.n_total {
            self.n_total = n_total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut teacher = Teacher {
            teacher_id: 1,
            time_period: 201718,
            qts_status: "Awarded QTS".into(),
            n_total: 20503,
        };
        teacher.apply(TeacherPatch { n_total: Some(20504), ..Default::default() });

        assert_eq!(teacher.n_total, 20504);
        assert_eq!(teacher.qts_status, "Awarded QTS");
        assert_eq!(teacher.time_period, 201718);
    }
}
