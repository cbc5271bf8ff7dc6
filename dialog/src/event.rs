//! Inbound events as the engine sees them: transport update with the callback token decoded.

use dbot_core::{MessageId, Update, UpdateKind, User};

use crate::callback::{Action, CallbackError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(String),
    Button(Action),
    MalformedButton { data: String, error: CallbackError },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub user: User,
    pub chat_id: i64,
    /// The inbound message for commands and text; the message carrying the button for callbacks.
    pub message_id: Option<MessageId>,
    pub callback_id: Option<String>,
    pub event: Event,
}

impl Inbound {
    pub fn from_update(update: &Update) -> Self {
        let (event, message_id, callback_id) = match &update.kind {
            UpdateKind::Command { name, message_id } => {
                (Event::Command(name.clone()), Some(*message_id), None)
            }
            UpdateKind::Text { body, message_id } => {
                (Event::Text(body.clone()), Some(*message_id), None)
            }
            UpdateKind::Callback {
                callback_id,
                data,
                message_id,
            } => {
                let event = match Action::decode(data) {
                    Ok(action) => Event::Button(action),
                    Err(error) => Event::MalformedButton {
                        data: data.clone(),
                        error,
                    },
                };
                (event, *message_id, Some(callback_id.clone()))
            }
        };

        Self {
            user: update.user.clone(),
            chat_id: update.chat.id,
            message_id,
            callback_id,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbot_core::Chat;

    fn chat() -> Chat {
        Chat {
            id: 500,
            chat_type: "private".to_string(),
        }
    }

    #[test]
    fn test_callback_is_decoded_once() {
        let update = Update::callback(User::with_id(1), chat(), "cb-1", "category:IT:job", Some(9));
        let inbound = Inbound::from_update(&update);

        assert_eq!(inbound.chat_id, 500);
        assert_eq!(inbound.message_id, Some(9));
        assert_eq!(inbound.callback_id.as_deref(), Some("cb-1"));
        assert!(matches!(inbound.event, Event::Button(Action::Category { .. })));
    }

    #[test]
    fn test_malformed_callback_keeps_raw_data() {
        let update = Update::callback(User::with_id(1), chat(), "cb-2", "city:Ош", None);
        let inbound = Inbound::from_update(&update);

        match inbound.event {
            Event::MalformedButton { data, .. } => assert_eq!(data, "city:Ош"),
            other => panic!("expected malformed button, got {:?}", other),
        }
    }

    #[test]
    fn test_text_and_command() {
        let text = Inbound::from_update(&Update::from_text(User::with_id(1), chat(), 3, "Aibek"));
        assert_eq!(text.event, Event::Text("Aibek".to_string()));
        assert_eq!(text.message_id, Some(3));

        let cmd = Inbound::from_update(&Update::from_text(User::with_id(1), chat(), 4, "/start"));
        assert_eq!(cmd.event, Event::Command("start".to_string()));
        assert!(cmd.callback_id.is_none());
    }
}
