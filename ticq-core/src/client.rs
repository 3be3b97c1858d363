//! [`Client`]: the facade applications hold. Owns the transport, the access filter and the listener
//! registry; turns platform updates into `message` events and application sends into platform calls.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::composer;
use crate::emitter::{EventEmitter, EVENT_MESSAGE, EVENT_ONLINE};
use crate::error::Result;
use crate::event::{ClientEvent, InboundEvent};
use crate::filter::AccessFilter;
use crate::normalizer;
use crate::segment::OutboundMessage;
use crate::transport::{SendOptions, Transport};
use crate::update::PlatformUpdate;
use crate::user::{FriendMap, UserHandle};

/// Account number reported when none is configured.
pub const DEFAULT_UIN: i64 = 1234567890;

/// Cloneable client handle; clones share transport, filter and listeners.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    filter: Arc<AccessFilter>,
    emitter: EventEmitter,
    friends: FriendMap,
    uin: i64,
}

impl Client {
    pub fn new(transport: Arc<dyn Transport>, filter: AccessFilter) -> Self {
        debug!(restricted = filter.is_restricted(), "Client created");
        Self {
            transport,
            filter: Arc::new(filter),
            emitter: EventEmitter::new(),
            friends: FriendMap,
            uin: DEFAULT_UIN,
        }
    }

    pub fn with_uin(mut self, uin: i64) -> Self {
        self.uin = uin;
        self
    }

    pub fn uin(&self) -> i64 {
        self.uin
    }

    pub fn filter(&self) -> &AccessFilter {
        &self.filter
    }

    /// Friend lookup (see [`FriendMap`]).
    pub fn fl(&self) -> &FriendMap {
        &self.friends
    }

    /// Registers a listener for `event` (e.g. [`EVENT_MESSAGE`], [`EVENT_ONLINE`]). Chainable.
    pub fn on<F>(&self, event: &str, listener: F) -> &Self
    where
        F: Fn(&ClientEvent) + Send + Sync + 'static,
    {
        debug!(event, "Listener registered");
        self.emitter.on(event, listener);
        self
    }

    /// Runs the listeners of `event`; returns how many ran.
    pub fn emit(&self, event: &str, payload: &ClientEvent) -> usize {
        self.emitter.emit(event, payload)
    }

    /// Sends `message` to `chat_id` (see [`composer::send`] for ordering and caption rules).
    pub async fn send(
        &self,
        chat_id: i64,
        message: impl Into<OutboundMessage>,
        options: &SendOptions,
    ) -> Result<()> {
        let message = message.into();
        composer::send(self.transport.as_ref(), chat_id, &message, options).await
    }

    /// Normalizes an update without emitting it. `None` when the chat is filtered out.
    pub fn normalize(&self, update: PlatformUpdate) -> Option<InboundEvent> {
        normalizer::normalize(update, &self.filter, self.transport.clone())
    }

    /// Normalizes an update and emits it as a `message` event.
    #[instrument(skip(self, update), fields(chat_id = update.chat_id, message_id = update.message_id))]
    pub fn handle_update(&self, update: PlatformUpdate) {
        if let Some(event) = self.normalize(update) {
            let delivered = self.emit(EVENT_MESSAGE, &ClientEvent::Message(event));
            debug!(listeners = delivered, "Emitted message event");
        }
    }

    /// Emits `system.online`.
    pub fn set_online(&self) {
        info!(uin = self.uin, "Client online");
        self.emit(EVENT_ONLINE, &ClientEvent::Online);
    }

    /// Handle for sending to one user. Never touches the network.
    pub fn pick_user(&self, user_id: i64) -> UserHandle {
        UserHandle::new(user_id, self.clone())
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("uin", &self.uin)
            .field("filter", &self.filter)
            .field("emitter", &self.emitter)
            .finish_non_exhaustive()
    }
}
