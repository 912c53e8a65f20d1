use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Draft, Entity, Reference, SqlValue};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Feedback {
    pub feedback_id: i64,
    pub feedback_time: String,
    pub feedback_content: Option<String>,
    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackDraft {
    pub feedback_id: Option<i64>,
    pub feedback_time: String,
    pub feedback_content: Option<String>,
    pub user_id: i64,
}

impl Entity for Feedback {
    const LABEL: &'static str = "Feedback";
    const COLLECTION: &'static str = "Feedbacks";
    const TABLE: &'static str = "feedback";
    const ID_COLUMN: &'static str = "feedback_id";
    const COLUMNS: &'static [&'static str] = &["feedback_time", "feedback_content", "user_id"];
    const REFERENCES: &'static [Reference] = &[Reference {
        column: "user_id",
        table: "user",
        id_column: "user_id",
    }];

    type Draft = FeedbackDraft;

    fn id(&self) -> i64 {
        self.feedback_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.feedback_time.clone().into(),
            self.feedback_content.clone().into(),
            self.user_id.into(),
        ]
    }
}

impl Draft for FeedbackDraft {
    fn id(&self) -> Option<i64> {
        self.feedback_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.feedback_time.clone().into(),
            self.feedback_content.clone().into(),
            self.user_id.into(),
        ]
    }
}
