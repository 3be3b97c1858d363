//! Chat allow-list applied to inbound updates.

use std::collections::HashSet;

/// Optional set of chat ids allowed to produce events. Without a set every chat passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessFilter {
    allowed_chats: Option<HashSet<i64>>,
}

impl AccessFilter {
    /// Filter that lets every chat through.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Filter that lets only the given chats through.
    pub fn only(chats: impl IntoIterator<Item = i64>) -> Self {
        Self {
            allowed_chats: Some(chats.into_iter().collect()),
        }
    }

    /// Builds from an optional id list, as read from configuration.
    pub fn from_config(chats: Option<&[i64]>) -> Self {
        match chats {
            Some(ids) => Self::only(ids.iter().copied()),
            None => Self::allow_all(),
        }
    }

    pub fn is_restricted(&self) -> bool {
        self.allowed_chats.is_some()
    }

    /// Whether updates from `chat_id` may produce events.
    pub fn permits(&self, chat_id: i64) -> bool {
        self.allowed_chats
            .as_ref()
            .map_or(true, |chats| chats.contains(&chat_id))
    }
}
