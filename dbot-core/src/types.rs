//! Core types: user, chat, inbound update, inline keyboard, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transport-level message id (Telegram uses 32-bit ids inside a chat).
pub type MessageId = i32;

/// User identity (id, username, names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Builds a user with only an id; names empty.
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
            last_name: None,
        }
    }
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// What arrived from the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateKind {
    /// `/name args...`; `name` is lowercased without the leading slash or `@bot` suffix.
    Command { name: String, message_id: MessageId },
    /// Free text that is not a command.
    Text { body: String, message_id: MessageId },
    /// Inline button press. `message_id` is the message carrying the button, when the transport still has it.
    Callback {
        callback_id: String,
        data: String,
        message_id: Option<MessageId>,
    },
}

/// A single inbound event with sender and chat to address replies to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub user: User,
    pub chat: Chat,
    pub kind: UpdateKind,
    pub received_at: DateTime<Utc>,
}

impl Update {
    /// Builds an update from raw text: text starting with `/` becomes a command, anything else free text.
    pub fn from_text(user: User, chat: Chat, message_id: MessageId, text: &str) -> Self {
        let kind = match parse_command(text) {
            Some(name) => UpdateKind::Command { name, message_id },
            None => UpdateKind::Text {
                body: text.to_string(),
                message_id,
            },
        };
        Self {
            user,
            chat,
            kind,
            received_at: Utc::now(),
        }
    }

    /// Builds an update for an inline button press.
    pub fn callback(
        user: User,
        chat: Chat,
        callback_id: impl Into<String>,
        data: impl Into<String>,
        message_id: Option<MessageId>,
    ) -> Self {
        Self {
            user,
            chat,
            kind: UpdateKind::Callback {
                callback_id: callback_id.into(),
                data: data.into(),
                message_id,
            },
            received_at: Utc::now(),
        }
    }

    /// Short label for logs.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            UpdateKind::Command { .. } => "command",
            UpdateKind::Text { .. } => "text",
            UpdateKind::Callback { .. } => "callback",
        }
    }
}

/// Extracts the command name from `/name@bot args`. Returns None for non-commands and a bare `/`.
pub fn parse_command(text: &str) -> Option<String> {
    let rest = text.trim_start().strip_prefix('/')?;
    let word = rest.split_whitespace().next()?;
    let name = word.split('@').next().unwrap_or(word);
    if name.is_empty() {
        return None;
    }
    Some(name.to_lowercase())
}

/// One inline button: label shown to the user and callback data sent back on press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Inline keyboard: rows of buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row and returns the keyboard (builder style).
    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        if !buttons.is_empty() {
            self.rows.push(buttons);
        }
        self
    }

    /// Appends a single-button row.
    pub fn button(self, label: impl Into<String>, data: impl Into<String>) -> Self {
        self.row(vec![Button::new(label, data)])
    }

    /// All callback data values, row by row.
    pub fn callback_data(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(|b| b.data.as_str())
    }
}

/// Handler result for the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain.
    Stop,
    /// Skip this handler, try next.
    Ignore,
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific update type to core [`Update`]. None when the update carries nothing the bot reacts to.
pub trait ToCoreUpdate: Send + Sync {
    fn to_core(&self) -> Option<Update>;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _update: &Update) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the update. Return Stop to end the handle phase. Default: Continue.
    async fn handle(&self, _update: &Update) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(&self, _update: &Update, _response: &HandlerResponse) -> crate::error::Result<()> {
        Ok(())
    }
}
