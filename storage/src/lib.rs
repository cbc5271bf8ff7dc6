//! Storage crate: persistence gateway for users, resumes and job postings.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – NewJob, JobRecord, JobFilter, JobSource, NewUser, ProfileFields, UserRecord, ResumeRecord
//! - [`gateway`] – PersistenceGateway trait consumed by the dialog core
//! - [`sqlite_gateway`] – SqliteGateway (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod gateway;
mod models;
mod sqlite_gateway;
mod sqlite_pool;

pub use error::StorageError;
pub use gateway::PersistenceGateway;
pub use models::{
    JobFilter, JobRecord, JobSource, NewJob, NewUser, ProfileFields, ResumeRecord, UserRecord,
    JOB_SEARCH_LIMIT,
};
pub use sqlite_gateway::SqliteGateway;
pub use sqlite_pool::SqlitePoolManager;
