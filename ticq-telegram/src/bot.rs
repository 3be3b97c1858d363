//! Builds the teloxide Bot from [`TicqConfig`]: proxy-aware HTTP client and optional API URL.

use crate::config::TicqConfig;
use anyhow::{Context, Result};
use teloxide::Bot;
use tracing::{info, instrument};

/// Creates the Bot. A configured proxy routes every Bot API request; a configured API URL
/// replaces the default `https://api.telegram.org`.
#[instrument(skip(config))]
pub fn build_bot(config: &TicqConfig) -> Result<Bot> {
    let mut builder = teloxide::net::default_reqwest_settings();
    if let Some(ref proxy) = config.proxy {
        let proxy = reqwest::Proxy::all(proxy.as_str()).context("Invalid proxy URL")?;
        builder = builder.proxy(proxy);
        info!("Using HTTP proxy for Bot API requests");
    }
    let client = builder.build().context("Failed to build HTTP client")?;

    let bot = Bot::with_client(config.bot_token.clone(), client);
    let bot = match config.telegram_api_url {
        Some(ref url_str) => {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
            info!(url = %url, "Using custom Bot API URL");
            bot.set_api_url(url)
        }
        None => bot,
    };
    Ok(bot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_bot_default() {
        let bot = build_bot(&TicqConfig::with_token("dummy_token".to_string())).unwrap();
        assert_eq!(bot.token(), "dummy_token");
        assert_eq!(bot.api_url().as_str(), "https://api.telegram.org/");
    }

    #[test]
    fn test_build_bot_with_proxy_and_api_url() {
        let mut config = TicqConfig::with_token("dummy_token".to_string());
        config.proxy = Some("http://127.0.0.1:7890".to_string());
        config.telegram_api_url = Some("http://127.0.0.1:8081/".to_string());

        let bot = build_bot(&config).unwrap();
        assert_eq!(bot.api_url().as_str(), "http://127.0.0.1:8081/");
    }

    #[test]
    fn test_build_bot_bad_api_url() {
        let mut config = TicqConfig::with_token("dummy_token".to_string());
        config.telegram_api_url = Some("not a url".to_string());
        assert!(build_bot(&config).is_err());
    }
}
