//! SQLite implementation of [`PersistenceGateway`]: users, resumes and job postings.
//!
//! Uses SqlitePoolManager and the models (NewJob, JobRecord, JobFilter, UserRecord, ResumeRecord).
//! Tables are created on first connect if missing.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::gateway::PersistenceGateway;
use crate::models::{JobFilter, JobRecord, NewJob, NewUser, ProfileFields, ResumeRecord, UserRecord};
use crate::sqlite_pool::SqlitePoolManager;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        telegram_id INTEGER NOT NULL UNIQUE,
        username TEXT,
        first_name TEXT,
        last_name TEXT,
        phone TEXT,
        city TEXT,
        specialty TEXT,
        experience TEXT,
        role TEXT NOT NULL DEFAULT 'user',
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS jobs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        category TEXT NOT NULL DEFAULT '',
        subcategory TEXT NOT NULL DEFAULT '',
        city TEXT NOT NULL DEFAULT '',
        salary TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL DEFAULT '',
        company TEXT NOT NULL DEFAULT '',
        is_active INTEGER NOT NULL DEFAULT 1,
        created_by INTEGER,
        source TEXT NOT NULL DEFAULT 'telegram',
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS resumes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        telegram_id INTEGER NOT NULL UNIQUE,
        username TEXT,
        name TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL DEFAULT '',
        city TEXT NOT NULL DEFAULT '',
        specialty TEXT NOT NULL DEFAULT '',
        experience TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_jobs_category ON jobs(category)",
    "CREATE INDEX IF NOT EXISTS idx_jobs_city ON jobs(city)",
    "CREATE INDEX IF NOT EXISTS idx_jobs_is_active ON jobs(is_active)",
    "CREATE INDEX IF NOT EXISTS idx_jobs_created_at ON jobs(created_at)",
];

#[derive(Clone)]
pub struct SqliteGateway {
    pool_manager: SqlitePoolManager,
}

impl SqliteGateway {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let gateway = Self { pool_manager };
        gateway.init().await?;
        Ok(gateway)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();
        for statement in SCHEMA {
            sqlx::query(statement).execute(pool).await?;
        }

        info!("Database tables created successfully");
        Ok(())
    }

    /// Resume stored for this identity, if any.
    pub async fn find_resume(&self, telegram_id: i64) -> Result<Option<ResumeRecord>, StorageError> {
        let resume = sqlx::query_as::<_, ResumeRecord>("SELECT * FROM resumes WHERE telegram_id = ?")
            .bind(telegram_id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(resume)
    }

    /// Activates or deactivates a posting. Returns false when no job has this id.
    pub async fn set_job_active(&self, job_id: i64, is_active: bool) -> Result<bool, StorageError> {
        let result = sqlx::query("UPDATE jobs SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(job_id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PersistenceGateway for SqliteGateway {
    #[instrument(skip(self, user), fields(telegram_id = user.telegram_id))]
    async fn upsert_user(&self, user: &NewUser) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO users (telegram_id, username, first_name, last_name, role, created_at)
            VALUES (?, ?, ?, ?, 'user', ?)
            ON CONFLICT(telegram_id) DO UPDATE SET
                username = excluded.username,
                first_name = excluded.first_name,
                last_name = excluded.last_name
            "#,
        )
        .bind(user.telegram_id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        debug!("Upserted user");
        Ok(())
    }

    #[instrument(skip(self, profile))]
    async fn upsert_user_profile(
        &self,
        telegram_id: i64,
        profile: &ProfileFields,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO users (telegram_id, first_name, phone, city, specialty, experience, role, created_at)
            VALUES (?, NULLIF(?, ''), ?, ?, ?, ?, 'user', ?)
            ON CONFLICT(telegram_id) DO UPDATE SET
                first_name = COALESCE(excluded.first_name, users.first_name),
                phone = excluded.phone,
                city = excluded.city,
                specialty = excluded.specialty,
                experience = excluded.experience
            "#,
        )
        .bind(telegram_id)
        .bind(&profile.name)
        .bind(&profile.phone)
        .bind(&profile.city)
        .bind(&profile.specialty)
        .bind(&profile.experience)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        info!("Saved profile fields");
        Ok(())
    }

    #[instrument(skip(self, username, profile))]
    async fn upsert_resume(
        &self,
        telegram_id: i64,
        username: Option<&str>,
        profile: &ProfileFields,
    ) -> Result<(), StorageError> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO resumes (telegram_id, username, name, phone, city, specialty, experience, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(telegram_id) DO UPDATE SET
                username = excluded.username,
                name = excluded.name,
                phone = excluded.phone,
                city = excluded.city,
                specialty = excluded.specialty,
                experience = excluded.experience,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(telegram_id)
        .bind(username)
        .bind(&profile.name)
        .bind(&profile.phone)
        .bind(&profile.city)
        .bind(&profile.specialty)
        .bind(&profile.experience)
        .bind(now)
        .bind(now)
        .execute(self.pool_manager.pool())
        .await?;

        info!("Saved resume");
        Ok(())
    }

    #[instrument(skip(self, job), fields(source = %job.source))]
    async fn insert_job(&self, job: &NewJob) -> Result<i64, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO jobs (title, description, category, subcategory, city, salary, phone, company, is_active, created_by, source, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?, ?)
            "#,
        )
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.category)
        .bind(&job.subcategory)
        .bind(&job.city)
        .bind(&job.salary)
        .bind(&job.phone)
        .bind(&job.company)
        .bind(job.created_by)
        .bind(job.source.as_str())
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        let id = result.last_insert_rowid();
        info!(job_id = id, title = %job.title, "Saved job");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn query_jobs(&self, filter: &JobFilter) -> Result<Vec<JobRecord>, StorageError> {
        let mut sql = String::from("SELECT * FROM jobs WHERE is_active = 1");
        let mut params: Vec<&str> = Vec::new();

        if let Some(category) = filter.category.as_deref() {
            sql.push_str(" AND category = ?");
            params.push(category);
        }
        if let Some(subcategory) = filter.subcategory.as_deref() {
            sql.push_str(" AND subcategory = ?");
            params.push(subcategory);
        }
        if let Some(city) = filter.city.as_deref() {
            sql.push_str(" AND city = ?");
            params.push(city);
        }

        sql.push_str(&format!(
            " ORDER BY created_at DESC, id DESC LIMIT {}",
            filter.effective_limit()
        ));

        let mut query_builder = sqlx::query_as::<_, JobRecord>(&sql);
        for param in params {
            query_builder = query_builder.bind(param);
        }

        let jobs = query_builder.fetch_all(self.pool_manager.pool()).await?;
        info!("Found {} jobs", jobs.len());
        Ok(jobs)
    }

    async fn find_user(&self, telegram_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE telegram_id = ?")
            .bind(telegram_id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(user)
    }
}
