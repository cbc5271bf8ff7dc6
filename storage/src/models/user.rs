//! User and resume models.
//!
//! Map to the `users` and `resumes` tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transport identity written on every inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// The five fields collected by the profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub name: String,
    pub phone: String,
    pub city: String,
    pub specialty: String,
    pub experience: String,
}

/// Stored user row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub specialty: Option<String>,
    pub experience: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Stored resume row (denormalized copy of the profile, keyed by telegram id).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResumeRecord {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub name: String,
    pub phone: String,
    pub city: String,
    pub specialty: String,
    pub experience: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
