//! Adapter config: bot token, optional proxy, chat allow-list, API URL and log path.
//! Loaded from env: TICQ_BOT_TOKEN (or BOT_TOKEN), TICQ_PROXY / HTTPS_PROXY / HTTP_PROXY,
//! TICQ_ALLOWED_CHATS, TELEGRAM_API_URL (or TELOXIDE_API_URL), LOG_FILE.

use anyhow::{Context, Result};
use std::env;
use ticq_core::AccessFilter;

/// Telegram adapter config, read once at startup.
#[derive(Debug, Clone)]
pub struct TicqConfig {
    pub bot_token: String,
    /// HTTP(S) proxy for Bot API calls.
    pub proxy: Option<String>,
    /// Chats allowed to produce events; `None` lets every chat through.
    pub allowed_chats: Option<Vec<i64>>,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl TicqConfig {
    /// Loads from env. `token` overrides TICQ_BOT_TOKEN / BOT_TOKEN if provided.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("TICQ_BOT_TOKEN")
                .or_else(|_| env::var("BOT_TOKEN"))
                .map_err(|_| anyhow::anyhow!("TICQ_BOT_TOKEN not set"))?,
        };
        let proxy = non_empty_var("TICQ_PROXY")
            .or_else(|| non_empty_var("HTTPS_PROXY"))
            .or_else(|| non_empty_var("HTTP_PROXY"));
        let allowed_chats = match non_empty_var("TICQ_ALLOWED_CHATS") {
            Some(raw) => Some(parse_chat_list(&raw)?),
            None => None,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok();

        Ok(Self {
            bot_token,
            proxy,
            allowed_chats,
            telegram_api_url,
            log_file,
        })
    }

    /// Builds config with the given token; other fields None.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            proxy: None,
            allowed_chats: None,
            telegram_api_url: None,
            log_file: None,
        }
    }

    /// Validate config (proxy and API URL must parse if set).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("TICQ_BOT_TOKEN is empty");
        }
        if let Some(ref proxy) = self.proxy {
            if reqwest::Url::parse(proxy).is_err() {
                anyhow::bail!("Proxy is set but not a valid URL: {}", proxy);
            }
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    pub fn access_filter(&self) -> AccessFilter {
        AccessFilter::from_config(self.allowed_chats.as_deref())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses `"1, -1002,3"` into chat ids; blank entries are skipped.
pub fn parse_chat_list(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("TICQ_ALLOWED_CHATS contains an invalid chat id: {}", s))
        })
        .collect()
}
