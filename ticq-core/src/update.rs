//! Platform-neutral record of an incoming text message, filled in by the transport crate.

/// Kind of chat an update came from, as the platform reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatKind {
    Group,
    Supergroup,
    Private,
    /// Anything else (e.g. a channel); carries the platform's name for it.
    Other(String),
}

impl ChatKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "group" => ChatKind::Group,
            "supergroup" => ChatKind::Supergroup,
            "private" => ChatKind::Private,
            other => ChatKind::Other(other.to_string()),
        }
    }

    pub fn is_group_like(&self) -> bool {
        matches!(self, ChatKind::Group | ChatKind::Supergroup)
    }
}

/// Origin identity of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSender {
    pub id: i64,
    pub username: Option<String>,
}

/// One incoming text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformUpdate {
    pub chat_id: i64,
    pub chat_kind: ChatKind,
    pub chat_title: Option<String>,
    pub message_id: i32,
    pub from: Option<UpdateSender>,
    pub text: String,
}

/// Converts a transport-specific incoming message into a [`PlatformUpdate`].
///
/// Returns `None` when the message has no text payload.
pub trait ToPlatformUpdate: Send + Sync {
    fn to_update(&self) -> Option<PlatformUpdate>;
}
