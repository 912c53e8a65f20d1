//! One-time import of the census statistics CSV.
//!
//! Every CSV row yields one record in each of the seven statistic tables. A
//! table is only seeded while it is empty, so restarts never duplicate data.

use serde::Deserialize;
use sqlx::SqlitePool;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::database::models::{
    AgeGroup, AgeGroupDraft, CourseLevel, CourseLevelDraft, Disability, DisabilityDraft,
    Employment, EmploymentDraft, Entity, Ethnicity, EthnicityDraft, Gender, GenderDraft, Teacher,
    TeacherDraft,
};
use crate::database::repository::Repository;
use crate::database::DatabaseError;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// One line of `df_prepared.csv`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedRow {
    pub time_period: i64,
    pub pct_total_age_u25: i64,
    pub pct_total_age_25andover: i64,
    pub pct_total_sex_m: i64,
    pub pct_total_sex_f: i64,
    pub pct_total_ethnic_asian: i64,
    pub pct_total_ethnic_black: i64,
    pub pct_total_ethnic_white: i64,
    pub pct_total_ethnic_mixed_ethnicity: i64,
    pub pct_total_ethnic_other: i64,
    pub pct_total_ethnic_unknown: i64,
    pub employment_status: String,
    pub course_level_recoded: String,
    pub pct_total_disability: i64,
    pub pct_total_nondisability: i64,
    pub pct_total_disability_unknown: i64,
    pub qts_status: String,
    pub n_total: i64,
}

impl SeedRow {
    fn age_group(&self) -> AgeGroupDraft {
        AgeGroupDraft {
            age_group_id: None,
            time_period: self.time_period,
            pct_total_age_u25: self.pct_total_age_u25,
            pct_total_age_25andover: self.pct_total_age_25andover,
        }
    }

    fn gender(&self) -> GenderDraft {
        GenderDraft {
            gender_id: None,
            time_period: self.time_period,
            pct_total_sex_m: self.pct_total_sex_m,
            pct_total_sex_f: self.pct_total_sex_f,
        }
    }

    fn ethnicity(&self) -> EthnicityDraft {
        EthnicityDraft {
            ethnicity_id: None,
            time_period: self.time_period,
            pct_total_ethnic_asian: self.pct_total_ethnic_asian,
            pct_total_ethnic_black: self.pct_total_ethnic_black,
            pct_total_ethnic_white: self.pct_total_ethnic_white,
            pct_total_ethnic_mixed_ethnicity: self.pct_total_ethnic_mixed_ethnicity,
            pct_total_ethnic_other: self.pct_total_ethnic_other,
            pct_total_ethnic_unknown: self.pct_total_ethnic_unknown,
        }
    }

    fn employment(&self) -> EmploymentDraft {
        EmploymentDraft {
            employment_id: None,
            time_period: self.time_period,
            employment_status: self.employment_status.clone(),
        }
    }

    fn course_level(&self) -> CourseLevelDraft {
        CourseLevelDraft {
            course_level_id: None,
            time_period: self.time_period,
            course_level_recoded: self.course_level_recoded.clone(),
        }
    }

    fn disability(&self) -> DisabilityDraft {
        DisabilityDraft {
            disability_id: None,
            time_period: self.time_period,
            pct_total_disability: self.pct_total_disability,
            pct_total_nondisability: self.pct_total_nondisability,
            pct_total_disability_unknown: self.pct_total_disability_unknown,
        }
    }

    fn teacher(&self) -> TeacherDraft {
        TeacherDraft {
            teacher_id: None,
            time_period: self.time_period,
            qts_status: self.qts_status.clone(),
            n_total: self.n_total,
        }
    }
}

/// Rows written per table; zero for tables that already held data
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub tables: Vec<(&'static str, usize)>,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.tables.iter().map(|(_, n)| n).sum()
    }
}

pub fn read_seed_file(path: &Path) -> Result<Vec<SeedRow>, SeedError> {
    let wrap = |source| SeedError::Csv {
        path: path.display().to_string(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(wrap)?;
    reader
        .deserialize()
        .collect::<Result<Vec<SeedRow>, csv::Error>>()
        .map_err(wrap)
}

/// Seed every statistic table that is still empty
pub async fn seed_if_empty(pool: &SqlitePool, rows: &[SeedRow]) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();
    report.tables.push(seed_table::<AgeGroup>(pool, rows, SeedRow::age_group).await?);
    report.tables.push(seed_table::<Gender>(pool, rows, SeedRow::gender).await?);
    report.tables.push(seed_table::<Ethnicity>(pool, rows, SeedRow::ethnicity).await?);
    report.tables.push(seed_table::<Employment>(pool, rows, SeedRow::employment).await?);
    report.tables.push(seed_table::<CourseLevel>(pool, rows, SeedRow::course_level).await?);
    report.tables.push(seed_table::<Disability>(pool, rows, SeedRow::disability).await?);
    report.tables.push(seed_table::<Teacher>(pool, rows, SeedRow::teacher).await?);
    Ok(report)
}

/// Read `path` and seed from it
pub async fn seed_from_file(pool: &SqlitePool, path: &Path) -> Result<SeedReport, SeedError> {
    let rows = read_seed_file(path)?;
    debug!("Read {} seed rows from {}", rows.len(), path.display());
    seed_if_empty(pool, &rows).await
}

async fn seed_table<T: Entity>(
    pool: &SqlitePool,
    rows: &[SeedRow],
    draft: fn(&SeedRow) -> T::Draft,
) -> Result<(&'static str, usize), DatabaseError> {
    let repo = Repository::<T>::new(pool.clone());
    if repo.count().await? > 0 {
        debug!("Table {} already populated, skipping seed", T::TABLE);
        return Ok((T::TABLE, 0));
    }

    let drafts: Vec<T::Draft> = rows.iter().map(draft).collect();
    let written = repo.insert_all(&drafts).await?;
    info!("Seeded {} rows into {}", written, T::TABLE);
    Ok((T::TABLE, written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::{connect, schema::ensure_schema};
    use std::path::PathBuf;

    fn bundled_seed_file() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join("df_prepared.csv")
    }

    #[test]
    fn reads_bundled_seed_file() {
        let rows = read_seed_file(&bundled_seed_file()).unwrap();
        assert!(!rows.is_empty());

        let first = &rows[0];
        assert_eq!(first.time_period, 201718);
        assert_eq!(first.pct_total_age_u25, 81);
        assert_eq!(first.qts_status, "Awarded QTS");
        assert_eq!(first.n_total, 20503);
        assert_eq!(rows[3].qts_status, "Total");
        assert_eq!(rows[3].n_total, 26794);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_seed_file(Path::new("/nonexistent/seed.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/seed.csv"));
    }

    #[tokio::test]
    async fn seeds_each_table_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::development().database;
        config.path = dir.path().join("seed.sqlite");
        let pool = connect(&config).await.unwrap();
        ensure_schema(&pool).await.unwrap();

        let rows = read_seed_file(&bundled_seed_file()).unwrap();
        let first = seed_if_empty(&pool, &rows).await.unwrap();
        assert_eq!(first.tables.len(), 7);
        assert_eq!(first.total(), rows.len() * 7);

        let second = seed_if_empty(&pool, &rows).await.unwrap();
        assert_eq!(second.total(), 0);

        let teachers = Repository::<Teacher>::new(pool).count().await.unwrap();
        assert_eq!(teachers as usize, rows.len());
    }
}
