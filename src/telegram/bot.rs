//! Bot initialization and command definitions
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Webhook registration helpers used by the CLI

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

use crate::core::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "регистрация и главное меню")]
    Start,
    #[command(description = "справка по боту")]
    Help,
    #[command(description = "статистика платформы (только для администраторов)")]
    Admin,
}

impl Command {
    /// Parses the command word of a message, accepting the `/start@BotName`
    /// form clients send after picking a command from the menu. Arguments
    /// such as a `/start` deep-link payload are ignored.
    pub fn from_text(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let word = word.split_once('@').map_or(word, |(command, _)| command);
        Self::parse(word, "").ok()
    }
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to create bot (invalid URL, client build failure)
pub fn create_bot(token: &str) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token, client);

    let bot = match config::BOT_API_URL.as_deref() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            bot.set_api_url(url)
        }
        None => bot,
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(vec![
        BotCommand::new("start", "регистрация и главное меню"),
        BotCommand::new("help", "справка по боту"),
    ])
    .await?;

    Ok(())
}

/// Points Telegram at `{base_url}/{token}` and registers the command list.
///
/// `secret` is echoed back by Telegram in `X-Telegram-Bot-Api-Secret-Token`.
pub async fn register_webhook(bot: &Bot, base_url: &str, token: &str, secret: Option<&str>) -> anyhow::Result<url::Url> {
    let url = webhook_url(base_url, token)?;
    let mut request = bot.set_webhook(url.clone());
    if let Some(secret) = secret {
        request = request.secret_token(secret.to_string());
    }
    request.await?;
    setup_bot_commands(bot).await?;
    log::info!("Webhook set to {}/<token>", base_url.trim_end_matches('/'));
    Ok(url)
}

pub async fn remove_webhook(bot: &Bot) -> anyhow::Result<()> {
    bot.delete_webhook().await?;
    log::info!("Webhook removed");
    Ok(())
}

/// Joins the public base URL and the token path segment.
pub fn webhook_url(base_url: &str, token: &str) -> Result<url::Url, url::ParseError> {
    url::Url::parse(&format!("{}/{}", base_url.trim_end_matches('/'), token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert!(matches!(Command::parse("/start", ""), Ok(Command::Start)));
        assert!(matches!(Command::parse("/help", ""), Ok(Command::Help)));
        assert!(matches!(Command::parse("/admin", ""), Ok(Command::Admin)));
        assert!(Command::parse("/unknown", "").is_err());
        assert!(Command::parse("hello", "").is_err());
    }

    #[test]
    fn command_word_ignores_bot_suffix_and_arguments() {
        assert_eq!(Command::from_text("/start@FreelanceTMBot"), Some(Command::Start));
        assert_eq!(Command::from_text("/help@FreelanceTMBot please"), Some(Command::Help));
        assert_eq!(Command::from_text("/start ref_42"), Some(Command::Start));
        assert_eq!(Command::from_text("/unknown@FreelanceTMBot"), None);
        assert_eq!(Command::from_text("user@example.com"), None);
        assert_eq!(Command::from_text("   "), None);
    }

    #[test]
    fn builds_webhook_url() {
        let url = webhook_url("https://example.vercel.app/", "123:ABC").unwrap();
        assert_eq!(url.as_str(), "https://example.vercel.app/123:ABC");
        assert!(webhook_url("not a url", "x").is_err());
    }
}
