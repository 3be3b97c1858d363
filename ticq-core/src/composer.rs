//! Outbound composer: flattens an [`OutboundMessage`] into the ordered platform calls that deliver it.
//!
//! All text and mention segments are joined (in order) into one body. Without images the body goes
//! out as a single plain message. With images, the body becomes the caption of the first photo and
//! every further photo is sent on its own, in order. Calls are awaited one at a time so the remote
//! side sees them in input order; a failed call stops the sequence and earlier sends stay delivered.

use tracing::{debug, error, instrument};

use crate::error::Result;
use crate::segment::{ImageSource, OutboundMessage, Segment};
use crate::transport::{SendOptions, Transport};

/// One platform call produced by [`plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOp {
    Message { text: String, options: SendOptions },
    Photo { image: ImageSource, options: SendOptions },
}

/// Computes the ordered calls for `message` without performing them.
pub fn plan(message: &OutboundMessage, options: &SendOptions) -> Vec<SendOp> {
    let mut texts = Vec::new();
    let mut images = Vec::new();
    for segment in message.segments() {
        match segment {
            Segment::Image { source } => images.push(source),
            other => texts.extend(other.plain_text()),
        }
    }
    let text = texts.concat();

    let mut images = images.into_iter();
    match images.next() {
        Some(first) => {
            let mut ops = vec![SendOp::Photo {
                image: first,
                options: options.with_default_caption(text),
            }];
            let rest = options.without_caption();
            ops.extend(images.map(|image| SendOp::Photo {
                image,
                options: rest.clone(),
            }));
            ops
        }
        None => vec![SendOp::Message {
            text,
            options: options.clone(),
        }],
    }
}

/// Sends `message` to `chat_id`, one call at a time. The first transport error is returned as is.
#[instrument(skip(transport, message, options))]
pub async fn send(
    transport: &dyn Transport,
    chat_id: i64,
    message: &OutboundMessage,
    options: &SendOptions,
) -> Result<()> {
    let ops = plan(message, options);
    debug!(chat_id, calls = ops.len(), message = ?message, "Sending message");

    for (step, op) in ops.iter().enumerate() {
        let result = match op {
            SendOp::Message { text, options } => {
                transport.send_message(chat_id, text, options).await
            }
            SendOp::Photo { image, options } => transport.send_photo(chat_id, image, options).await,
        };
        if let Err(e) = result {
            error!(chat_id, step, error = %e, "Send failed, remaining calls skipped");
            return Err(e);
        }
    }
    Ok(())
}
