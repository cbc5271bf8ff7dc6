//! Job posting models: insert payload, stored row, search filter, provenance.
//!
//! Maps to the `jobs` table and is used by SqliteGateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StorageError;

/// Default and maximum number of rows returned by a job search.
pub const JOB_SEARCH_LIMIT: i64 = 10;

/// Who submitted a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobSource {
    /// Submitted through the chat vacancy wizard.
    Telegram,
    /// Created from the admin panel.
    Admin,
    /// Generated test data.
    Seed,
}

impl JobSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSource::Telegram => "telegram",
            JobSource::Admin => "admin",
            JobSource::Seed => "seed",
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobSource {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "telegram" => Ok(JobSource::Telegram),
            "admin" => Ok(JobSource::Admin),
            "seed" => Ok(JobSource::Seed),
            other => Err(StorageError::InvalidValue(format!("job source {}", other))),
        }
    }
}

/// A complete job posting ready to insert. New postings are always active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub city: String,
    pub salary: String,
    pub phone: String,
    /// Empty when the submitter has no company.
    pub company: String,
    /// Telegram id of the submitter; None for admin/seed postings.
    pub created_by: Option<i64>,
    pub source: JobSource,
}

/// Stored job row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub city: String,
    pub salary: String,
    pub phone: String,
    pub company: String,
    pub is_active: bool,
    pub created_by: Option<i64>,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl JobRecord {
    /// Parsed provenance; None if the column holds an unknown value.
    pub fn job_source(&self) -> Option<JobSource> {
        self.source.parse().ok()
    }
}

/// Search filter. Absent fields do not constrain the search; only active jobs match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub city: Option<String>,
    pub limit: i64,
}

impl Default for JobFilter {
    fn default() -> Self {
        Self {
            category: None,
            subcategory: None,
            city: None,
            limit: JOB_SEARCH_LIMIT,
        }
    }
}

impl JobFilter {
    /// Filter on all three fields with the default limit. Empty strings count as absent.
    pub fn new(category: &str, subcategory: &str, city: &str) -> Self {
        fn non_empty(s: &str) -> Option<String> {
            (!s.is_empty()).then(|| s.to_string())
        }
        Self {
            category: non_empty(category),
            subcategory: non_empty(subcategory),
            city: non_empty(city),
            limit: JOB_SEARCH_LIMIT,
        }
    }

    /// Limit clamped to 1..=JOB_SEARCH_LIMIT.
    pub fn effective_limit(&self) -> i64 {
        self.limit.clamp(1, JOB_SEARCH_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_source_round_trip_through_text() {
        for source in [JobSource::Telegram, JobSource::Admin, JobSource::Seed] {
            assert_eq!(source.as_str().parse::<JobSource>().unwrap(), source);
        }
        assert!("bot".parse::<JobSource>().is_err());
    }

    #[test]
    fn test_filter_treats_empty_as_absent() {
        let f = JobFilter::new("IT", "", "Ош");
        assert_eq!(f.category.as_deref(), Some("IT"));
        assert!(f.subcategory.is_none());
        assert_eq!(f.city.as_deref(), Some("Ош"));
        assert_eq!(f.limit, JOB_SEARCH_LIMIT);
    }

    #[test]
    fn test_effective_limit_is_clamped() {
        let mut f = JobFilter::default();
        f.limit = 500;
        assert_eq!(f.effective_limit(), JOB_SEARCH_LIMIT);
        f.limit = 0;
        assert_eq!(f.effective_limit(), 1);
    }
}
