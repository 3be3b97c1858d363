//! # ticq-core
//!
//! icqq-style client model over a pluggable chat transport: message [`Segment`]s, the outbound
//! [`composer`], the inbound [`normalizer`], the [`Client`] facade with its listener registry,
//! per-user handles, and tracing initialization. Transport-agnostic; `ticq-telegram` supplies the
//! Telegram [`Transport`].

pub mod client;
pub mod composer;
pub mod emitter;
pub mod error;
pub mod event;
pub mod filter;
pub mod logger;
pub mod normalizer;
pub mod segment;
pub mod transport;
pub mod update;
pub mod user;

pub use client::{Client, DEFAULT_UIN};
pub use composer::{plan, SendOp};
pub use emitter::{EventEmitter, Listener, EVENT_MESSAGE, EVENT_ONLINE};
pub use error::{Result, TicqError};
pub use event::{ClientEvent, InboundEvent, MessageType, ReplyHandle, Sender, SubType};
pub use filter::AccessFilter;
pub use logger::init_tracing;
pub use segment::{ImageSource, OutboundMessage, Segment};
pub use transport::{SendOptions, Transport};
pub use update::{ChatKind, PlatformUpdate, ToPlatformUpdate, UpdateSender};
pub use user::{FriendInfo, FriendMap, UserHandle};
