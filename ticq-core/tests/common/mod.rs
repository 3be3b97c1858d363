//! Recording transport shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use ticq_core::{ImageSource, Result, SendOptions, TicqError, Transport};
use tokio::sync::mpsc;
use tokio::time::sleep;

/// One platform call seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentCall {
    Message {
        chat_id: i64,
        text: String,
        options: SendOptions,
    },
    Photo {
        chat_id: i64,
        image: ImageSource,
        options: SendOptions,
    },
}

/// Mock transport that records calls on a channel, optionally delaying each call and failing one.
pub struct MockTransport {
    sender: mpsc::UnboundedSender<SentCall>,
    delay_ms: u64,
    fail_on_call: Option<usize>,
    calls: AtomicUsize,
    in_flight: AtomicBool,
    overlapped: AtomicBool,
}

impl MockTransport {
    pub fn new(delay_ms: u64) -> (Self, mpsc::UnboundedReceiver<SentCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                sender: tx,
                delay_ms,
                fail_on_call: None,
                calls: AtomicUsize::new(0),
                in_flight: AtomicBool::new(false),
                overlapped: AtomicBool::new(false),
            },
            rx,
        )
    }

    /// Makes the `index`-th call (0-based) fail with a transport error.
    pub fn failing_on(mut self, index: usize) -> Self {
        self.fail_on_call = Some(index);
        self
    }

    /// True if a call started while another was still running.
    pub fn saw_overlap(&self) -> bool {
        self.overlapped.load(Ordering::SeqCst)
    }

    async fn record(&self, call: SentCall) -> Result<()> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            self.overlapped.store(true, Ordering::SeqCst);
        }
        sleep(Duration::from_millis(self.delay_ms)).await;
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.in_flight.store(false, Ordering::SeqCst);

        if self.fail_on_call == Some(index) {
            return Err(TicqError::Transport("Too Many Requests: retry after 5".to_string()));
        }
        let _ = self.sender.send(call);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send_message(&self, chat_id: i64, text: &str, options: &SendOptions) -> Result<()> {
        self.record(SentCall::Message {
            chat_id,
            text: text.to_string(),
            options: options.clone(),
        })
        .await
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        image: &ImageSource,
        options: &SendOptions,
    ) -> Result<()> {
        self.record(SentCall::Photo {
            chat_id,
            image: image.clone(),
            options: options.clone(),
        })
        .await
    }
}

/// Collects every call recorded so far.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<SentCall>) -> Vec<SentCall> {
    let mut calls = Vec::new();
    while let Ok(call) = rx.try_recv() {
        calls.push(call);
    }
    calls
}
