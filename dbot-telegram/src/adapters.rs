//! Adapters from Telegram (teloxide) types to dbot_core types.

use dbot_core::{Chat, ToCoreUpdate, ToCoreUser, Update, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

pub(crate) fn chat_type(chat: &teloxide::types::Chat) -> &'static str {
    if chat.is_private() {
        "private"
    } else if chat.is_group() || chat.is_supergroup() {
        "group"
    } else if chat.is_channel() {
        "channel"
    } else {
        "unknown"
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    Chat {
        id: chat.id.0,
        chat_type: chat_type(chat).to_string(),
    }
}

/// Wraps a teloxide Message. Only text messages with a sender become updates.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreUpdate for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Option<Update> {
        let msg = self.0;
        let text = msg.text()?;
        let user = TelegramUserWrapper(msg.from.as_ref()?).to_core();
        Some(Update::from_text(user, core_chat(&msg.chat), msg.id.0, text))
    }
}

/// Wraps a teloxide CallbackQuery. Queries without data are dropped; the carrying message is
/// optional because Telegram omits it for very old messages.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreUpdate for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Option<Update> {
        let query = self.0;
        let data = query.data.as_ref()?;
        let user = TelegramUserWrapper(&query.from).to_core();

        let (chat, message_id) = match query.message.as_ref() {
            Some(m) => (core_chat(m.chat()), Some(m.id().0)),
            // Private chat id equals the user id.
            None => (
                Chat {
                    id: user.id,
                    chat_type: "private".to_string(),
                },
                None,
            ),
        };

        Some(Update::callback(
            user,
            chat,
            query.id.to_string(),
            data.clone(),
            message_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: TelegramUserWrapper converts teloxide User to core User with id, username and names.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Aibek".to_string(),
            last_name: Some("Asanov".to_string()),
            username: Some("aibek".to_string()),
            language_code: Some("ru".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("aibek".to_string()));
        assert_eq!(core_user.first_name, Some("Aibek".to_string()));
        assert_eq!(core_user.last_name, Some("Asanov".to_string()));
    }
}
