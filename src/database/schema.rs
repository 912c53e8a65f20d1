use sqlx::SqlitePool;

use crate::database::DatabaseError;

/// Table definitions, applied in order. Existing tables are left untouched.
const TABLES: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS "user" (
        "user_id" INTEGER PRIMARY KEY,
        "email" TEXT NOT NULL UNIQUE,
        "password_hash" TEXT NOT NULL,
        "user_name" TEXT NOT NULL UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "feedback" (
        "feedback_id" INTEGER PRIMARY KEY,
        "feedback_time" TEXT NOT NULL,
        "feedback_content" TEXT,
        "user_id" INTEGER NOT NULL REFERENCES "user" ("user_id")
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "age_group" (
        "age_group_id" INTEGER PRIMARY KEY,
        "time_period" INTEGER NOT NULL,
        "pct_total_age_u25" INTEGER NOT NULL,
        "pct_total_age_25andover" INTEGER NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "gender" (
        "gender_id" INTEGER PRIMARY KEY,
        "time_period" INTEGER NOT NULL,
        "pct_total_sex_m" INTEGER NOT NULL,
        "pct_total_sex_f" INTEGER NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "ethnicity" (
        "ethnicity_id" INTEGER PRIMARY KEY,
        "time_period" INTEGER NOT NULL,
        "pct_total_ethnic_asian" INTEGER NOT NULL,
        "pct_total_ethnic_black" INTEGER NOT NULL,
        "pct_total_ethnic_white" INTEGER NOT NULL,
        "pct_total_ethnic_mixed_ethnicity" INTEGER NOT NULL,
        "pct_total_ethnic_other" INTEGER NOT NULL,
        "pct_total_ethnic_unknown" INTEGER NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "employment" (
        "employment_id" INTEGER PRIMARY KEY,
        "time_period" INTEGER NOT NULL,
        "employment_status" TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "course_level" (
        "course_level_id" INTEGER PRIMARY KEY,
        "time_period" INTEGER NOT NULL,
        "course_level_recoded" TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "disability_group" (
        "disability_id" INTEGER PRIMARY KEY,
        "time_period" INTEGER NOT NULL,
        "pct_total_disability" INTEGER NOT NULL,
        "pct_total_nondisability" INTEGER NOT NULL,
        "pct_total_disability_unknown" INTEGER NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "teacher" (
        "teacher_id" INTEGER PRIMARY KEY,
        "time_period" INTEGER NOT NULL,
        "qts_status" TEXT NOT NULL,
        "n_total" INTEGER NOT NULL
    )"#,
];

/// Create every entity table that does not exist yet
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DatabaseError> {
    for statement in TABLES {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("Schema ready ({} tables)", TABLES.len());
    Ok(())
}
