//! Side effects produced by a transition, executed in order by the executor.

use dbot_core::{Keyboard, MessageId};
use serde::{Deserialize, Serialize};
use storage::{JobFilter, NewJob, ProfileFields};

/// Writes handed to the persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistOp {
    InsertJob(NewJob),
    UpsertUserProfile {
        telegram_id: i64,
        profile: ProfileFields,
    },
    UpsertResume {
        telegram_id: i64,
        username: Option<String>,
        profile: ProfileFields,
    },
}

impl PersistOp {
    pub fn name(&self) -> &'static str {
        match self {
            PersistOp::InsertJob(_) => "insert_job",
            PersistOp::UpsertUserProfile { .. } => "upsert_user_profile",
            PersistOp::UpsertResume { .. } => "upsert_resume",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Sends a message. When `ephemeral`, the new message id is tracked for the wizard flush.
    SendMessage {
        chat_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
        ephemeral: bool,
    },
    DeleteMessage {
        chat_id: i64,
        message_id: MessageId,
    },
    AnswerCallback {
        callback_id: String,
    },
    Persist(PersistOp),
    /// Queries the gateway and renders the results (or an empty-result message).
    SearchJobs {
        chat_id: i64,
        filter: JobFilter,
    },
    /// Loads the stored profile and renders it (or a "not found" message).
    ShowProfile {
        chat_id: i64,
        telegram_id: i64,
    },
}

impl Effect {
    pub fn send(chat_id: i64, text: impl Into<String>, keyboard: Option<Keyboard>) -> Self {
        Effect::SendMessage {
            chat_id,
            text: text.into(),
            keyboard,
            ephemeral: false,
        }
    }

    pub fn send_ephemeral(chat_id: i64, text: impl Into<String>, keyboard: Option<Keyboard>) -> Self {
        Effect::SendMessage {
            chat_id,
            text: text.into(),
            keyboard,
            ephemeral: true,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Effect::SendMessage { .. } => "send_message",
            Effect::DeleteMessage { .. } => "delete_message",
            Effect::AnswerCallback { .. } => "answer_callback",
            Effect::Persist(op) => op.name(),
            Effect::SearchJobs { .. } => "search_jobs",
            Effect::ShowProfile { .. } => "show_profile",
        }
    }
}
