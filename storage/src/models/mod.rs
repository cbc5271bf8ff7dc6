mod job;
mod user;

pub use job::{JobFilter, JobRecord, JobSource, NewJob, JOB_SEARCH_LIMIT};
pub use user::{NewUser, ProfileFields, ResumeRecord, UserRecord};
