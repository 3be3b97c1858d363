//! Login loop: verifies the token, announces the client online, and dispatches text messages
//! into [`Client::handle_update`] until SIGINT or SIGTERM.

use crate::adapters::TelegramMessageWrapper;
use std::time::Duration;

use anyhow::{Context, Result};
use teloxide::dispatching::ShutdownToken;
use teloxide::prelude::*;
use ticq_core::{Client, ToPlatformUpdate};
use tracing::{debug, info, instrument, warn};

const SHUTDOWN_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Connects to Telegram and runs until a shutdown signal arrives.
///
/// `get_me` runs first so a bad token fails here instead of inside the polling loop. The client
/// emits `system.online` right before polling starts.
#[instrument(skip(client, bot))]
pub async fn login(client: Client, bot: Bot) -> Result<()> {
    let me = bot.get_me().await.context("Failed to reach Telegram (get_me)")?;
    info!(
        bot_id = me.user.id.0,
        username = ?me.user.username,
        "Logged in"
    );

    let handler_client = client.clone();
    let handler = Update::filter_message().endpoint(move |msg: Message| {
        let client = handler_client.clone();
        async move {
            match TelegramMessageWrapper(&msg).to_update() {
                Some(update) => client.handle_update(update),
                None => debug!(chat_id = msg.chat.id.0, "Ignoring non-text message"),
            }
            respond(())
        }
    });

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .default_handler(|_| async {})
        .build();

    let shutdown_token = dispatcher.shutdown_token();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        info!("Shutdown signal received, stopping polling");
        stop_dispatcher(shutdown_token).await;
    });

    client.set_online();
    dispatcher.dispatch().await;

    info!("Bot stopped");
    Ok(())
}

/// Requests dispatcher shutdown and waits for it. A request made before `dispatch` has started is
/// retried until the dispatcher is running.
pub(crate) async fn stop_dispatcher(token: ShutdownToken) {
    loop {
        match token.shutdown() {
            Ok(done) => {
                done.await;
                return;
            }
            Err(_) => {
                debug!("Dispatcher not running yet, retrying shutdown");
                tokio::time::sleep(SHUTDOWN_RETRY_INTERVAL).await;
            }
        }
    }
}

/// Resolves on SIGINT, or SIGTERM on unix.
pub async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => debug!("SIGINT"),
        _ = terminate => debug!("SIGTERM"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_bot, TicqConfig};

    const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

    fn ok_mock(server: &mut mockito::ServerGuard, method: &str, body: &str) -> mockito::Mock {
        server
            .mock("POST", format!("/bot{}/{}", TEST_BOT_TOKEN, method).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    /// **Test: A shutdown requested before dispatch starts still stops the dispatcher.**
    #[tokio::test]
    async fn test_stop_requested_before_dispatch() {
        let mut server = mockito::Server::new_async().await;
        let _get_me = ok_mock(
            &mut server,
            "getMe",
            r#"{"ok": true, "result": {"id": 123456789, "is_bot": true, "first_name": "TestBot", "username": "testbot"}}"#,
        );
        let _delete_webhook = ok_mock(&mut server, "deleteWebhook", r#"{"ok": true, "result": true}"#);
        let _get_updates = ok_mock(&mut server, "getUpdates", r#"{"ok": true, "result": []}"#);

        let mut config = TicqConfig::with_token(TEST_BOT_TOKEN.to_string());
        config.telegram_api_url = Some(server.url());
        let bot = build_bot(&config).unwrap();

        let handler = Update::filter_message().endpoint(|| async { respond(()) });
        let mut dispatcher = Dispatcher::builder(bot, handler)
            .default_handler(|_| async {})
            .build();

        let stopper = tokio::spawn(stop_dispatcher(dispatcher.shutdown_token()));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!stopper.is_finished());

        tokio::time::timeout(Duration::from_secs(10), dispatcher.dispatch())
            .await
            .expect("dispatcher stops after an early shutdown request");
        tokio::time::timeout(Duration::from_secs(10), stopper)
            .await
            .expect("stop_dispatcher returns")
            .unwrap();
    }
}
