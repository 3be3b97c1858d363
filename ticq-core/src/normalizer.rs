//! Inbound normalizer: platform update → [`InboundEvent`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::event::{InboundEvent, MessageType, ReplyHandle, Sender, SubType};
use crate::filter::AccessFilter;
use crate::transport::{SendOptions, Transport};
use crate::update::{ChatKind, PlatformUpdate};

/// Converts `update` into an event, or `None` when the chat is filtered out.
///
/// Group and supergroup chats become `group`/`normal` with `group_id`/`group_name`; private chats
/// become `private`/`friend`. Other chat kinds keep the `group`/`normal` defaults with no group
/// fields. The event's reply handle targets the update's chat and replies to its message.
pub fn normalize(
    update: PlatformUpdate,
    filter: &AccessFilter,
    transport: Arc<dyn Transport>,
) -> Option<InboundEvent> {
    let chat_id = update.chat_id;

    if !filter.permits(chat_id) {
        warn!(
            chat_id,
            message_id = update.message_id,
            chat_kind = ?update.chat_kind,
            "Chat not in allow-list, update dropped"
        );
        return None;
    }

    let options = SendOptions::reply_to(update.message_id);
    let sender = match update.from {
        Some(from) => Sender {
            user_id: from.id,
            nickname: from.username,
        },
        None => Sender {
            user_id: 0,
            nickname: None,
        },
    };
    let reply_handle = ReplyHandle::new(transport, chat_id, options);

    let event = match update.chat_kind {
        ChatKind::Group | ChatKind::Supergroup => {
            let mut event = InboundEvent::new(
                MessageType::Group,
                SubType::Normal,
                update.text,
                sender,
                reply_handle,
            );
            event.group_id = Some(chat_id);
            event.group_name = update.chat_title;
            event
        }
        ChatKind::Private => InboundEvent::new(
            MessageType::Private,
            SubType::Friend,
            update.text,
            sender,
            reply_handle,
        ),
        ChatKind::Other(ref kind) => {
            warn!(chat_id, chat_kind = %kind, "Unrecognized chat kind, emitting as group without group fields");
            InboundEvent::new(
                MessageType::Group,
                SubType::Normal,
                update.text,
                sender,
                reply_handle,
            )
        }
    };

    debug!(
        chat_id,
        user_id = event.user_id,
        message_type = ?event.message_type,
        text = %event.text,
        "Normalized update"
    );
    Some(event)
}
