//! Wraps teloxide::Bot and implements [`ticq_core::Transport`]. Production code sends through the Telegram
//! Bot API; tests substitute another Transport impl.

use async_trait::async_trait;
use teloxide::payloads::setters::*;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, InputFile, MessageId, ReplyParameters};
use ticq_core::{ImageSource, Result, SendOptions, TicqError, Transport};

/// Thin wrapper around teloxide::Bot that implements ticq-core's Transport trait.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: teloxide::Bot,
}

impl TelegramTransport {
    /// Creates a transport from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

/// Turns an image source into the upload form teloxide expects.
pub fn input_file(image: &ImageSource) -> Result<InputFile> {
    match image {
        ImageSource::Binary(bytes) => Ok(InputFile::memory(bytes.clone())),
        ImageSource::Url(url) => reqwest::Url::parse(url)
            .map(InputFile::url)
            .map_err(|e| TicqError::InvalidImage(format!("{}: {}", url, e))),
        ImageSource::Path(path) => Ok(InputFile::file(path.clone())),
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_message(&self, chat_id: i64, text: &str, options: &SendOptions) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat_id), text.to_string());
        if let Some(id) = options.reply_to_message_id {
            request = request.reply_parameters(ReplyParameters::new(MessageId(id)));
        }
        request
            .await
            .map_err(|e| TicqError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        image: &ImageSource,
        options: &SendOptions,
    ) -> Result<()> {
        let mut request = self.bot.send_photo(ChatId(chat_id), input_file(image)?);
        if let Some(caption) = options.caption.as_deref().filter(|c| !c.is_empty()) {
            request = request.caption(caption.to_string());
        }
        if let Some(id) = options.reply_to_message_id {
            request = request.reply_parameters(ReplyParameters::new(MessageId(id)));
        }
        request
            .await
            .map_err(|e| TicqError::Transport(e.to_string()))?;
        Ok(())
    }
}
