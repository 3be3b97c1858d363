//! ticq CLI: log in to Telegram and print every event. Config from env and optional CLI args.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use ticq_cli::{load_config, register_listeners, Cli, Commands};
use ticq_core::{init_tracing, Client};
use ticq_telegram::{build_bot, login, TelegramTransport};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, echo } => {
            let config = load_config(token)?;
            init_tracing(config.log_file.as_deref())?;

            let bot = build_bot(&config)?;
            let client = Client::new(
                Arc::new(TelegramTransport::new(bot.clone())),
                config.access_filter(),
            );
            register_listeners(&client, echo);
            login(client, bot).await
        }
    }
}
