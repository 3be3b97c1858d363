//! Downstream platform abstraction.
//!
//! [`Transport`] is the pair of platform calls the composer needs. `ticq-telegram` implements it over
//! teloxide; tests substitute a recording implementation.

use async_trait::async_trait;

use crate::error::Result;
use crate::segment::ImageSource;

/// Per-call options threaded through to the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Message to thread the send under (correlation with the triggering message).
    pub reply_to_message_id: Option<i32>,
    /// Caption for a photo send; ignored for plain messages.
    pub caption: Option<String>,
}

impl SendOptions {
    /// Options replying to the given platform message.
    pub fn reply_to(message_id: i32) -> Self {
        Self {
            reply_to_message_id: Some(message_id),
            caption: None,
        }
    }

    /// Copy of these options with `caption` attached, unless a caption is already present.
    pub fn with_default_caption(&self, caption: impl Into<String>) -> Self {
        Self {
            caption: self.caption.clone().or_else(|| Some(caption.into())),
            ..self.clone()
        }
    }

    /// Copy of these options with any caption removed.
    pub fn without_caption(&self) -> Self {
        Self {
            caption: None,
            ..self.clone()
        }
    }
}

/// Platform send operations. Implementations map to one transport (e.g. Telegram).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a plain text message to the chat.
    async fn send_message(&self, chat_id: i64, text: &str, options: &SendOptions) -> Result<()>;
    /// Sends one image to the chat; `options.caption` is attached when present.
    async fn send_photo(&self, chat_id: i64, image: &ImageSource, options: &SendOptions)
        -> Result<()>;
}
