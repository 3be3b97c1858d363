//! Per-user handles and the friend lookup stub.

use serde::Serialize;
use tracing::debug;

use crate::client::Client;
use crate::error::Result;
use crate::segment::OutboundMessage;
use crate::transport::SendOptions;

/// Friend entry returned by [`FriendMap::get`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendInfo {
    pub user_id: i64,
}

/// Friend lookup. There is no roster behind it: every id resolves to an entry carrying that id.
#[derive(Debug, Clone, Copy, Default)]
pub struct FriendMap;

impl FriendMap {
    pub fn get(&self, user_id: i64) -> FriendInfo {
        FriendInfo { user_id }
    }
}

/// A user bound to a client. Cheap to create; handles for the same id behave the same.
#[derive(Debug, Clone)]
pub struct UserHandle {
    user_id: i64,
    client: Client,
}

impl UserHandle {
    pub(crate) fn new(user_id: i64, client: Client) -> Self {
        Self { user_id, client }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Sends a direct message. The user id is used as the private chat id, which holds on
    /// platforms (like Telegram) where a private chat shares its id with the user.
    pub async fn send_msg(&self, message: impl Into<OutboundMessage>) -> Result<()> {
        let message = message.into();
        debug!(user_id = self.user_id, message = ?message, "User send message");
        self.client
            .send(self.user_id, message, &SendOptions::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friend_map_echoes_id() {
        let fl = FriendMap;
        assert_eq!(fl.get(42), FriendInfo { user_id: 42 });
        assert_eq!(fl.get(-1).user_id, -1);
    }
}
