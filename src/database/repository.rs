use sqlx::{sqlite::SqliteRow, QueryBuilder, Sqlite, SqlitePool};
use std::marker::PhantomData;

use crate::database::manager::{quote_identifier, DatabaseError};
use crate::database::models::{Draft, Entity, SqlValue};

/// Typed data access for one entity table
pub struct Repository<T> {
    pool: SqlitePool,
    _phantom: PhantomData<T>,
}

impl<T: Entity> Repository<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    fn table() -> String {
        quote_identifier(T::TABLE)
    }

    fn decode(row: &SqliteRow) -> Result<T, DatabaseError> {
        T::from_row(row).map_err(DatabaseError::from)
    }

    /// All rows, ordered by id
    pub async fn list(&self) -> Result<Vec<T>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM {} ORDER BY {}",
            Self::table(),
            quote_identifier(T::ID_COLUMN)
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(Self::decode).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Option<T>, DatabaseError> {
        self.find_by(T::ID_COLUMN, id).await
    }

    /// First row whose `column` equals `value`. Only declared columns are accepted.
    pub async fn find_by(
        &self,
        column: &str,
        value: impl Into<SqlValue>,
    ) -> Result<Option<T>, DatabaseError> {
        let column = Self::known_column(column)?;
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT * FROM {} WHERE {} = ",
            Self::table(),
            quote_identifier(column)
        ));
        bind_value(&mut qb, value.into());
        qb.push(" LIMIT 1");

        let row = qb.build().fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::decode).transpose()
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let sql = format!("SELECT COUNT(*) FROM {}", Self::table());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Insert one draft and return the stored record with its assigned id
    pub async fn insert(&self, draft: &T::Draft) -> Result<T, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let id = insert_row::<T>(&mut conn, draft).await?;
        drop(conn);

        self.get(id).await?.ok_or_else(|| {
            DatabaseError::NotFound(format!("{} {} vanished after insert", T::LABEL, id))
        })
    }

    /// Insert every draft in a single transaction; returns the number of rows written
    pub async fn insert_all(&self, drafts: &[T::Draft]) -> Result<usize, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        for draft in drafts {
            insert_row::<T>(&mut tx, draft).await?;
        }
        tx.commit().await?;
        Ok(drafts.len())
    }

    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            Self::table(),
            quote_identifier(T::ID_COLUMN)
        );
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("{} {} not found", T::LABEL, id)));
        }
        Ok(())
    }

    /// Write every column of `record` back to its row
    pub async fn update(&self, record: &T) -> Result<T, DatabaseError> {
        let id = record.id();
        let mut qb = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", Self::table()));
        for (i, (column, value)) in T::COLUMNS.iter().zip(record.values()).enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(quote_identifier(column));
            qb.push(" = ");
            bind_value(&mut qb, value);
        }
        qb.push(format!(" WHERE {} = ", quote_identifier(T::ID_COLUMN)));
        qb.push_bind(id);

        let result = qb.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("{} {} not found", T::LABEL, id)));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("{} {} not found", T::LABEL, id)))
    }

    /// Describe the first constraint `draft` would break: a taken id, a taken
    /// unique value or a reference to a missing row.
    pub async fn constraint_violation(
        &self,
        draft: &T::Draft,
    ) -> Result<Option<String>, DatabaseError> {
        if let Some(id) = draft.id() {
            if self.exists(T::TABLE, T::ID_COLUMN, SqlValue::Integer(id)).await? {
                return Ok(Some(format!("{} {} already exists", T::ID_COLUMN, id)));
            }
        }

        let values = draft.values();
        let value_of = |column: &str| {
            T::COLUMNS
                .iter()
                .position(|c| *c == column)
                .and_then(|index| values.get(index).cloned())
                .unwrap_or(SqlValue::Null)
        };

        for column in T::UNIQUE {
            let value = value_of(*column);
            if value != SqlValue::Null && self.exists(T::TABLE, column, value).await? {
                return Ok(Some(format!("{} is already taken", column)));
            }
        }

        for reference in T::REFERENCES {
            let value = value_of(reference.column);
            if value != SqlValue::Null
                && !self.exists(reference.table, reference.id_column, value).await?
            {
                return Ok(Some(format!(
                    "{} does not match any {} row",
                    reference.column, reference.table
                )));
            }
        }

        Ok(None)
    }

    async fn exists(
        &self,
        table: &str,
        column: &str,
        value: SqlValue,
    ) -> Result<bool, DatabaseError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ",
            quote_identifier(table),
            quote_identifier(column)
        ));
        bind_value(&mut qb, value);
        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count > 0)
    }

    fn known_column(column: &str) -> Result<&'static str, DatabaseError> {
        if column == T::ID_COLUMN {
            return Ok(T::ID_COLUMN);
        }
        T::COLUMNS
            .iter()
            .copied()
            .find(|c| *c == column)
            .ok_or_else(|| DatabaseError::UnknownColumn {
                table: T::TABLE,
                column: column.to_string(),
            })
    }
}

async fn insert_row<T: Entity>(
    conn: &mut sqlx::SqliteConnection,
    draft: &T::Draft,
) -> Result<i64, DatabaseError> {
    let mut columns = Vec::with_capacity(T::COLUMNS.len() + 1);
    let mut values = Vec::with_capacity(T::COLUMNS.len() + 1);
    if let Some(id) = draft.id() {
        columns.push(quote_identifier(T::ID_COLUMN));
        values.push(SqlValue::Integer(id));
    }
    columns.extend(T::COLUMNS.iter().map(|c| quote_identifier(c)));
    values.extend(draft.values());

    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "INSERT INTO {} ({}) VALUES (",
        quote_identifier(T::TABLE),
        columns.join(", ")
    ));
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        bind_value(&mut qb, value);
    }
    qb.push(")");

    let result = qb.build().execute(&mut *conn).await?;
    Ok(result.last_insert_rowid())
}

fn bind_value(qb: &mut QueryBuilder<'_, Sqlite>, value: SqlValue) {
    match value {
        SqlValue::Integer(v) => {
            qb.push_bind(v);
        }
        SqlValue::Text(v) => {
            qb.push_bind(v);
        }
        SqlValue::Null => {
            qb.push_bind(None::<String>);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::models::{
        Feedback, FeedbackDraft, Teacher, TeacherDraft, User, UserDraft,
    };
    use crate::database::{connect, schema::ensure_schema};

    async fn test_pool() -> (tempfile::TempDir, SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::development().database;
        config.path = dir.path().join("repo.sqlite");
        let pool = connect(&config).await.unwrap();
        ensure_schema(&pool).await.unwrap();
        (dir, pool)
    }

    fn teacher(status: &str, n_total: i64) -> TeacherDraft {
        TeacherDraft {
            teacher_id: None,
            time_period: 201718,
            qts_status: status.to_string(),
            n_total,
        }
    }

    fn user(email: &str, name: &str) -> UserDraft {
        UserDraft {
            user_id: None,
            email: email.to_string(),
            password_hash: "hash".to_string(),
            user_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_ids_and_lists_in_order() {
        let (_dir, pool) = test_pool().await;
        let repo = Repository::<Teacher>::new(pool);

        let first = repo.insert(&teacher("Awarded QTS", 20503)).await.unwrap();
        let second = repo.insert(&teacher("Total", 26794)).await.unwrap();

        assert_eq!(first.teacher_id, 1);
        assert_eq!(second.teacher_id, 2);
        let all = repo.list().await.unwrap();
        assert_eq!(all, vec![first, second]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn insert_honours_client_supplied_id() {
        let (_dir, pool) = test_pool().await;
        let repo = Repository::<Teacher>::new(pool);

        let mut draft = teacher("Total", 1);
        draft.teacher_id = Some(40);
        let stored = repo.insert(&draft).await.unwrap();

        assert_eq!(stored.teacher_id, 40);
        assert_eq!(
            repo.constraint_violation(&draft).await.unwrap(),
            Some("teacher_id 40 already exists".to_string())
        );
    }

    #[tokio::test]
    async fn get_misses_are_none() {
        let (_dir, pool) = test_pool().await;
        let repo = Repository::<Teacher>::new(pool);
        assert!(repo.get(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_one_row_and_reports_misses() {
        let (_dir, pool) = test_pool().await;
        let repo = Repository::<Teacher>::new(pool);
        let stored = repo.insert(&teacher("Total", 10)).await.unwrap();

        repo.delete(stored.teacher_id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(matches!(
            repo.delete(stored.teacher_id).await,
            Err(DatabaseError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_writes_every_column() {
        let (_dir, pool) = test_pool().await;
        let repo = Repository::<Teacher>::new(pool);
        let mut stored = repo.insert(&teacher("Total", 10)).await.unwrap();

        stored.n_total = 11;
        stored.qts_status = "Awarded QTS".to_string();
        let updated = repo.update(&stored).await.unwrap();
        assert_eq!(updated, stored);

        stored.teacher_id = 500;
        assert!(matches!(repo.update(&stored).await, Err(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn find_by_rejects_undeclared_columns() {
        let (_dir, pool) = test_pool().await;
        let repo = Repository::<User>::new(pool);
        repo.insert(&user("ada@example.com", "ada")).await.unwrap();

        let found = repo.find_by("email", "ada@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.user_name), Some("ada".to_string()));
        assert!(matches!(
            repo.find_by("email = email OR 1", "x").await,
            Err(DatabaseError::UnknownColumn { .. })
        ));
    }

    #[tokio::test]
    async fn unique_columns_are_reported() {
        let (_dir, pool) = test_pool().await;
        let repo = Repository::<User>::new(pool);
        repo.insert(&user("ada@example.com", "ada")).await.unwrap();

        let violation = repo
            .constraint_violation(&user("ada@example.com", "someone"))
            .await
            .unwrap();
        assert_eq!(violation, Some("email is already taken".to_string()));

        let err = repo.insert(&user("other@example.com", "ada")).await.unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn dangling_references_are_reported() {
        let (_dir, pool) = test_pool().await;
        let users = Repository::<User>::new(pool.clone());
        let feedback = Repository::<Feedback>::new(pool);

        let draft = FeedbackDraft {
            feedback_id: None,
            feedback_time: "2024-01-01 10:00:00".to_string(),
            feedback_content: Some("Useful".to_string()),
            user_id: 7,
        };
        assert!(feedback.constraint_violation(&draft).await.unwrap().is_some());

        let owner = users.insert(&user("ada@example.com", "ada")).await.unwrap();
        let draft = FeedbackDraft { user_id: owner.user_id, ..draft };
        assert_eq!(feedback.constraint_violation(&draft).await.unwrap(), None);
        let stored = feedback.insert(&draft).await.unwrap();
        assert_eq!(stored.feedback_content.as_deref(), Some("Useful"));
    }

    #[tokio::test]
    async fn insert_all_is_transactional() {
        let (_dir, pool) = test_pool().await;
        let repo = Repository::<User>::new(pool);

        let drafts = vec![user("a@example.com", "a"), user("a@example.com", "b")];
        assert!(repo.insert_all(&drafts).await.is_err());
        assert_eq!(repo.count().await.unwrap(), 0);

        let drafts = vec![user("a@example.com", "a"), user("b@example.com", "b")];
        assert_eq!(repo.insert_all(&drafts).await.unwrap(), 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
