//! The `--echo` listener replies to each message with its own segments.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use ticq_cli::register_listeners;
use ticq_core::{
    AccessFilter, ChatKind, Client, ImageSource, PlatformUpdate, Result, SendOptions, Transport,
    UpdateSender, EVENT_MESSAGE,
};

struct RecordingTransport {
    tx: mpsc::UnboundedSender<(i64, String, SendOptions)>,
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_message(&self, chat_id: i64, text: &str, options: &SendOptions) -> Result<()> {
        let _ = self.tx.send((chat_id, text.to_string(), options.clone()));
        Ok(())
    }

    async fn send_photo(&self, _: i64, _: &ImageSource, _: &SendOptions) -> Result<()> {
        Ok(())
    }
}

fn private_update(text: &str) -> PlatformUpdate {
    PlatformUpdate {
        chat_id: 42,
        chat_kind: ChatKind::Private,
        chat_title: None,
        message_id: 5,
        from: Some(UpdateSender {
            id: 42,
            username: Some("alice".to_string()),
        }),
        text: text.to_string(),
    }
}

/// **Test: With echo on, a message is sent back to its chat as a reply.**
#[tokio::test]
async fn test_echo_replies_with_same_text() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let client = Client::new(Arc::new(RecordingTransport { tx }), AccessFilter::allow_all());
    register_listeners(&client, true);

    client.handle_update(private_update("ping"));

    let (chat_id, text, options) = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("echo reply within timeout")
        .expect("channel open");
    assert_eq!(chat_id, 42);
    assert_eq!(text, "ping");
    assert_eq!(options.reply_to_message_id, Some(5));
}

/// **Test: Without echo, only the logging listener is installed and nothing is sent.**
#[tokio::test]
async fn test_no_echo_sends_nothing() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let client = Client::new(Arc::new(RecordingTransport { tx }), AccessFilter::allow_all());
    register_listeners(&client, false);

    assert_eq!(client.emit(EVENT_MESSAGE, &ticq_core::ClientEvent::Online), 1);
    client.handle_update(private_update("ping"));

    tokio::task::yield_now().await;
    assert!(rx.try_recv().is_err());
}
