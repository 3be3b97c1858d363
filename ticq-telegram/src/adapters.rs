//! Adapters from Telegram (teloxide) types to ticq_core types.
//! Depends only on teloxide and ticq_core type definitions.

use ticq_core::{ChatKind, PlatformUpdate, ToPlatformUpdate, UpdateSender};

/// Maps a teloxide chat onto the chat kinds the normalizer distinguishes.
pub fn chat_kind(chat: &teloxide::types::Chat) -> ChatKind {
    if chat.is_private() {
        ChatKind::Private
    } else if chat.is_group() {
        ChatKind::Group
    } else if chat.is_supergroup() {
        ChatKind::Supergroup
    } else if chat.is_channel() {
        ChatKind::Other("channel".to_string())
    } else {
        ChatKind::Other("unknown".to_string())
    }
}

/// Wraps a teloxide User for conversion to the update's sender.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> TelegramUserWrapper<'a> {
    pub fn to_sender(&self) -> UpdateSender {
        UpdateSender {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to [`PlatformUpdate`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToPlatformUpdate for TelegramMessageWrapper<'a> {
    fn to_update(&self) -> Option<PlatformUpdate> {
        let text = self.0.text()?;
        Some(PlatformUpdate {
            chat_id: self.0.chat.id.0,
            chat_kind: chat_kind(&self.0.chat),
            chat_title: self.0.chat.title().map(str::to_string),
            message_id: self.0.id.0,
            from: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_sender()),
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: TelegramUserWrapper keeps id and username.**
    #[test]
    fn test_telegram_user_wrapper_to_sender() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let sender = TelegramUserWrapper(&user).to_sender();

        assert_eq!(sender.id, 123);
        assert_eq!(sender.username, Some("testuser".to_string()));
    }

    /// **Test: A user without username converts with username absent.**
    #[test]
    fn test_telegram_user_wrapper_minimal() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(456),
            is_bot: false,
            first_name: "Minimal".to_string(),
            last_name: None,
            username: None,
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let sender = TelegramUserWrapper(&user).to_sender();

        assert_eq!(sender.id, 456);
        assert_eq!(sender.username, None);
    }
}
