use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{non_null, Draft, Entity, Patchable, SqlValue};

/// Registered API user. The password hash is stored but never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub user_name: String,
}

/// Body accepted by `POST /Users`; the password arrives in plaintext
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserInput {
    pub user_id: Option<i64>,
    pub email: String,
    pub user_name: String,
    pub password: String,
}

/// Insertable user, after the password has been hashed
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub user_id: Option<i64>,
    pub email: String,
    pub password_hash: String,
    pub user_name: String,
}

impl UserInput {
    /// True when email, user name or password is an empty string
    pub fn has_blank_field(&self) -> bool {
        self.email.is_empty() || self.user_name.is_empty() || self.password.is_empty()
    }

    pub fn into_draft(self, password_hash: String) -> UserDraft {
        UserDraft {
            user_id: self.user_id,
            email: self.email,
            password_hash,
            user_name: self.user_name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default, deserialize_with = "non_null")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub password: Option<String>,
    /// Filled in by the handler once `password` has been hashed
    #[serde(skip)]
    pub password_hash: Option<String>,
}

impl Entity for User {
    const LABEL: &'static str = "User";
    const COLLECTION: &'static str = "Users";
    const TABLE: &'static str = "user";
    const ID_COLUMN: &'static str = "user_id";
    const COLUMNS: &'static [&'static str] = &["email", "password_hash", "user_name"];
    const UNIQUE: &'static [&'static str] = &["email", "user_name"];

    type Draft = UserDraft;

    fn id(&self) -> i64 {
        self.user_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.email.clone().into(),
            self.password_hash.clone().into(),
            self.user_name.clone().into(),
        ]
    }
}

impl Draft for UserDraft {
    fn id(&self) -> Option<i64> {
        self.user_id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.email.clone().into(),
            self.password_hash.clone().into(),
            self.user_name.clone().into(),
        ]
    }
}

impl Patchable for User {
    type Patch = UserPatch;

    fn patch_id(patch: &UserPatch) -> Option<i64> {
        patch.user_id
    }

    fn apply(&mut self, patch: UserPatch) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(user_name) = patch.user_name {
            self.user_name = user_name;
        }
        if let Some(password_hash) = patch.password_hash {
            self.password_hash = password_hash;
        }
    }
}
