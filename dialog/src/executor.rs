//! Runs transition effects against the transport and the persistence gateway.
//!
//! Deletes and callback acknowledgements are best-effort. Any other failure aborts the remaining
//! effects, tells the user something went wrong and resets the session to Idle.

use std::sync::Arc;

use dbot_core::{Bot, DbotError};
use storage::{PersistenceGateway, StorageError};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::effect::{Effect, PersistOp};
use crate::session::Session;
use crate::views::{self, View};

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("transport: {0}")]
    Transport(#[from] DbotError),
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

/// What happened while running one transition's effects.
#[derive(Debug, Default)]
pub struct ExecutionReport {
    pub executed: usize,
    /// Best-effort deletes or acknowledgements that failed.
    pub soft_failures: usize,
    pub error: Option<ExecutionError>,
}

impl ExecutionReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

fn failure_text(effect: &Effect) -> &'static str {
    match effect {
        Effect::SearchJobs { .. } => views::SEARCH_FAILURE,
        _ => views::GENERIC_FAILURE,
    }
}

#[derive(Clone)]
pub struct EffectExecutor {
    bot: Arc<dyn Bot>,
    gateway: Arc<dyn PersistenceGateway>,
}

impl EffectExecutor {
    pub fn new(bot: Arc<dyn Bot>, gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { bot, gateway }
    }

    /// Runs `effects` in order. Ids of ephemeral messages are tracked into `session.pending`.
    pub async fn execute(
        &self,
        session: &mut Session,
        chat_id: i64,
        effects: Vec<Effect>,
    ) -> ExecutionReport {
        let mut report = ExecutionReport::default();

        for effect in effects {
            match self.run(session, &effect).await {
                Ok(soft_failed) => {
                    report.executed += 1;
                    if soft_failed {
                        report.soft_failures += 1;
                    }
                }
                Err(e) => {
                    error!(effect = effect.kind_name(), error = %e, "Effect failed, aborting");
                    self.recover(session, chat_id, failure_text(&effect)).await;
                    report.error = Some(e);
                    break;
                }
            }
        }

        report
    }

    /// Returns Ok(true) when a best-effort effect failed.
    async fn run(&self, session: &mut Session, effect: &Effect) -> Result<bool, ExecutionError> {
        match effect {
            Effect::SendMessage {
                chat_id,
                text,
                keyboard,
                ephemeral,
            } => {
                let id = self
                    .bot
                    .send_message(*chat_id, text, keyboard.as_ref())
                    .await?;
                if *ephemeral {
                    session.pending.track(id);
                }
                Ok(false)
            }
            Effect::DeleteMessage {
                chat_id,
                message_id,
            } => match self.bot.delete_message(*chat_id, *message_id).await {
                Ok(()) => Ok(false),
                Err(e) => {
                    warn!(chat_id, message_id, error = %e, "Failed to delete message");
                    Ok(true)
                }
            },
            Effect::AnswerCallback { callback_id } => {
                match self.bot.answer_callback(callback_id).await {
                    Ok(()) => Ok(false),
                    Err(e) => {
                        warn!(callback_id = %callback_id, error = %e, "Failed to answer callback");
                        Ok(true)
                    }
                }
            }
            Effect::Persist(op) => {
                self.persist(op).await?;
                Ok(false)
            }
            Effect::SearchJobs { chat_id, filter } => {
                let jobs = self.gateway.query_jobs(filter).await?;
                debug!(chat_id, found = jobs.len(), "Job search finished");
                if jobs.is_empty() {
                    self.send_view(*chat_id, views::no_jobs()).await?;
                } else {
                    for job in &jobs {
                        self.send_view(*chat_id, views::job_card(job)).await?;
                    }
                    self.send_view(*chat_id, views::jobs_found(jobs.len()))
                        .await?;
                }
                Ok(false)
            }
            Effect::ShowProfile {
                chat_id,
                telegram_id,
            } => {
                let view = match self.gateway.find_user(*telegram_id).await? {
                    Some(user) => views::profile(&user),
                    None => views::profile_missing(),
                };
                self.send_view(*chat_id, view).await?;
                Ok(false)
            }
        }
    }

    async fn persist(&self, op: &PersistOp) -> Result<(), StorageError> {
        match op {
            PersistOp::InsertJob(job) => {
                self.gateway.insert_job(job).await?;
            }
            PersistOp::UpsertUserProfile {
                telegram_id,
                profile,
            } => {
                self.gateway
                    .upsert_user_profile(*telegram_id, profile)
                    .await?;
            }
            PersistOp::UpsertResume {
                telegram_id,
                username,
                profile,
            } => {
                self.gateway
                    .upsert_resume(*telegram_id, username.as_deref(), profile)
                    .await?;
            }
        }
        Ok(())
    }

    async fn send_view(&self, chat_id: i64, view: View) -> Result<(), DbotError> {
        self.bot
            .send_message(chat_id, &view.text, view.keyboard.as_ref())
            .await?;
        Ok(())
    }

    /// Failure path: flush what the wizard left behind, reset, tell the user.
    async fn recover(&self, session: &mut Session, chat_id: i64, notice: &str) {
        for effect in session.pending.flush(chat_id) {
            if let Effect::DeleteMessage {
                chat_id,
                message_id,
            } = effect
            {
                if let Err(e) = self.bot.delete_message(chat_id, message_id).await {
                    warn!(chat_id, message_id, error = %e, "Failed to delete message");
                }
            }
        }
        *session = Session::default();

        if let Err(e) = self
            .bot
            .send_message(chat_id, notice, None)
            .await
        {
            error!(chat_id, error = %e, "Failed to send failure notice");
        }
    }
}
