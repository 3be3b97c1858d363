//! Uniform message event delivered to listeners, with a reply handle bound to the originating chat.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::composer;
use crate::error::Result;
use crate::segment::{OutboundMessage, Segment};
use crate::transport::{SendOptions, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Group,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubType {
    Normal,
    Friend,
}

/// Who sent the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sender {
    pub user_id: i64,
    pub nickname: Option<String>,
}

/// Sends into a fixed chat with fixed options (the triggering message as reply target).
#[derive(Clone)]
pub struct ReplyHandle {
    transport: Arc<dyn Transport>,
    chat_id: i64,
    options: SendOptions,
}

impl ReplyHandle {
    pub fn new(transport: Arc<dyn Transport>, chat_id: i64, options: SendOptions) -> Self {
        Self {
            transport,
            chat_id,
            options,
        }
    }

    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }

    /// Sends `message` to the bound chat through the composer.
    pub async fn send(&self, message: impl Into<OutboundMessage>) -> Result<()> {
        let message = message.into();
        composer::send(self.transport.as_ref(), self.chat_id, &message, &self.options).await
    }
}

impl fmt::Debug for ReplyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyHandle")
            .field("chat_id", &self.chat_id)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A normalized incoming message.
///
/// `message_type`/`sub_type` is `group`/`normal` or `private`/`friend`. `group_id` and `group_name`
/// are set only for group and supergroup chats.
#[derive(Debug, Clone, Serialize)]
pub struct InboundEvent {
    pub post_type: &'static str,
    pub message_type: MessageType,
    pub sub_type: SubType,
    #[serde(rename = "message")]
    pub segments: Vec<Segment>,
    pub from_id: i64,
    pub text: String,
    pub sender: Sender,
    pub user_id: i64,
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip)]
    reply_handle: ReplyHandle,
}

impl InboundEvent {
    pub const POST_TYPE: &'static str = "message";

    /// Event for a chat of the given type; sender fields are copied to the top level.
    pub(crate) fn new(
        message_type: MessageType,
        sub_type: SubType,
        text: String,
        sender: Sender,
        reply_handle: ReplyHandle,
    ) -> Self {
        Self {
            post_type: Self::POST_TYPE,
            message_type,
            sub_type,
            segments: vec![Segment::text(text.as_str())],
            from_id: sender.user_id,
            text,
            user_id: sender.user_id,
            nickname: sender.nickname.clone(),
            sender,
            group_id: None,
            group_name: None,
            reply_handle,
        }
    }

    pub fn reply_handle(&self) -> &ReplyHandle {
        &self.reply_handle
    }

    /// Replies in the originating chat, threaded under the triggering message.
    pub async fn reply(&self, message: impl Into<OutboundMessage>) -> Result<()> {
        self.reply_handle.send(message).await
    }
}

/// Something a listener can receive.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    Message(InboundEvent),
    /// The platform connection is up.
    Online,
}

impl ClientEvent {
    pub fn as_message(&self) -> Option<&InboundEvent> {
        match self {
            ClientEvent::Message(event) => Some(event),
            ClientEvent::Online => None,
        }
    }
}
