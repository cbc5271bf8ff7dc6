use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{JobFilter, JobRecord, NewJob, NewUser, ProfileFields, UserRecord};

/// Persistence operations the dialog core consumes. All calls are keyed by telegram id.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Inserts the user or refreshes username and names.
    async fn upsert_user(&self, user: &NewUser) -> Result<(), StorageError>;

    /// Writes profile fields onto the user row. `name` only replaces first_name when non-empty.
    async fn upsert_user_profile(
        &self,
        telegram_id: i64,
        profile: &ProfileFields,
    ) -> Result<(), StorageError>;

    /// Inserts or replaces the resume for this identity.
    async fn upsert_resume(
        &self,
        telegram_id: i64,
        username: Option<&str>,
        profile: &ProfileFields,
    ) -> Result<(), StorageError>;

    /// Inserts an active job posting and returns its id.
    async fn insert_job(&self, job: &NewJob) -> Result<i64, StorageError>;

    /// Active jobs matching the filter, most recent first.
    async fn query_jobs(&self, filter: &JobFilter) -> Result<Vec<JobRecord>, StorageError>;

    async fn find_user(&self, telegram_id: i64) -> Result<Option<UserRecord>, StorageError>;
}
