//! In-memory `Bot` and `PersistenceGateway` used by the dialog integration tests.
//!
//! Both record every call and count them with atomics so tests can assert on exact effects.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dbot_core::{Bot, DbotError, Keyboard, MessageId};
use storage::{
    JobFilter, JobRecord, NewJob, NewUser, PersistenceGateway, ProfileFields, StorageError,
    UserRecord,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub message_id: MessageId,
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

/// Records sends, deletes and callback answers. Sent ids start at 1000 and increase.
#[derive(Debug, Clone)]
pub struct MockBot {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    deleted: Arc<Mutex<Vec<(i64, MessageId)>>>,
    answered: Arc<Mutex<Vec<String>>>,
    next_id: Arc<AtomicI32>,
    fail_deletes: Arc<AtomicBool>,
    fail_sends: Arc<AtomicBool>,
}

impl Default for MockBot {
    fn default() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            deleted: Arc::new(Mutex::new(Vec::new())),
            answered: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicI32::new(1000)),
            fail_deletes: Arc::new(AtomicBool::new(false)),
            fail_sends: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|m| m.text).collect()
    }

    pub fn last_sent(&self) -> Option<SentMessage> {
        self.sent.lock().unwrap().last().cloned()
    }

    pub fn deleted_ids(&self) -> Vec<MessageId> {
        self.deleted.lock().unwrap().iter().map(|(_, id)| *id).collect()
    }

    pub fn answered(&self) -> Vec<String> {
        self.answered.lock().unwrap().clone()
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> dbot_core::Result<MessageId> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(DbotError::transport("send failed"));
        }
        let message_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            message_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(message_id)
    }

    async fn delete_message(&self, chat_id: i64, message_id: MessageId) -> dbot_core::Result<()> {
        self.deleted.lock().unwrap().push((chat_id, message_id));
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(DbotError::transport("message to delete not found"));
        }
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> dbot_core::Result<()> {
        self.answered.lock().unwrap().push(callback_id.to_string());
        Ok(())
    }
}

/// Gateway that keeps writes in memory and counts calls per operation.
#[derive(Debug, Clone, Default)]
pub struct MockGateway {
    jobs: Arc<Mutex<Vec<NewJob>>>,
    profiles: Arc<Mutex<Vec<(i64, ProfileFields)>>>,
    resumes: Arc<Mutex<Vec<(i64, Option<String>, ProfileFields)>>>,
    search_results: Arc<Mutex<Vec<JobRecord>>>,
    insert_job_count: Arc<AtomicUsize>,
    upsert_profile_count: Arc<AtomicUsize>,
    upsert_resume_count: Arc<AtomicUsize>,
    query_count: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> Vec<NewJob> {
        self.jobs.lock().unwrap().clone()
    }

    pub fn profiles(&self) -> Vec<(i64, ProfileFields)> {
        self.profiles.lock().unwrap().clone()
    }

    pub fn resumes(&self) -> Vec<(i64, Option<String>, ProfileFields)> {
        self.resumes.lock().unwrap().clone()
    }

    pub fn set_search_results(&self, jobs: Vec<JobRecord>) {
        *self.search_results.lock().unwrap() = jobs;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn get_insert_job_count(&self) -> usize {
        self.insert_job_count.load(Ordering::SeqCst)
    }

    pub fn get_upsert_profile_count(&self) -> usize {
        self.upsert_profile_count.load(Ordering::SeqCst)
    }

    pub fn get_upsert_resume_count(&self) -> usize {
        self.upsert_resume_count.load(Ordering::SeqCst)
    }

    pub fn get_query_count(&self) -> usize {
        self.query_count.load(Ordering::SeqCst)
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Database("database is locked".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for MockGateway {
    async fn upsert_user(&self, _user: &NewUser) -> Result<(), StorageError> {
        Ok(())
    }

    async fn upsert_user_profile(
        &self,
        telegram_id: i64,
        profile: &ProfileFields,
    ) -> Result<(), StorageError> {
        self.upsert_profile_count.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;
        self.profiles
            .lock()
            .unwrap()
            .push((telegram_id, profile.clone()));
        Ok(())
    }

    async fn upsert_resume(
        &self,
        telegram_id: i64,
        username: Option<&str>,
        profile: &ProfileFields,
    ) -> Result<(), StorageError> {
        self.upsert_resume_count.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;
        self.resumes.lock().unwrap().push((
            telegram_id,
            username.map(str::to_string),
            profile.clone(),
        ));
        Ok(())
    }

    async fn insert_job(&self, job: &NewJob) -> Result<i64, StorageError> {
        self.insert_job_count.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;
        let mut jobs = self.jobs.lock().unwrap();
        jobs.push(job.clone());
        Ok(jobs.len() as i64)
    }

    async fn query_jobs(&self, _filter: &JobFilter) -> Result<Vec<JobRecord>, StorageError> {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.search_results.lock().unwrap().clone())
    }

    async fn find_user(&self, _telegram_id: i64) -> Result<Option<UserRecord>, StorageError> {
        Ok(None)
    }
}
