//! CLI parser, config loading and the listeners the `run` command installs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ticq_core::{Client, ClientEvent, OutboundMessage, EVENT_MESSAGE, EVENT_ONLINE};
use ticq_telegram::TicqConfig;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "ticq")]
#[command(about = "icqq-style client over the Telegram Bot API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Log in and print every event (config from env; token can override TICQ_BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Reply to every message with its own segments.
        #[arg(long)]
        echo: bool,
    },
}

/// Load TicqConfig from environment. If `token` is provided it overrides TICQ_BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<TicqConfig> {
    let config = TicqConfig::from_env(token)?;
    config.validate()?;
    Ok(config)
}

/// Installs the logging listeners and, with `echo`, one that replies with the received segments.
pub fn register_listeners(client: &Client, echo: bool) {
    client
        .on(EVENT_ONLINE, |_| info!("Ready to receive messages"))
        .on(EVENT_MESSAGE, |event: &ClientEvent| {
            if let Some(message) = event.as_message() {
                match serde_json::to_string(message) {
                    Ok(json) => info!(event = %json, "Received message"),
                    Err(e) => error!(error = %e, "Failed to serialize event"),
                }
            }
        });

    if echo {
        client.on(EVENT_MESSAGE, |event: &ClientEvent| {
            let Some(message) = event.as_message().cloned() else {
                return;
            };
            tokio::spawn(async move {
                let reply = OutboundMessage::Segments(message.segments.clone());
                if let Err(e) = message.reply(reply).await {
                    error!(error = %e, from_id = message.from_id, "Echo reply failed");
                }
            });
        });
    }
}
