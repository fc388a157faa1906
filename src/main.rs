use anyhow::{Context, Result};
use dotenvy::dotenv;

use freelancetm::cli::{Cli, Commands};
use freelancetm::core::{config, init_logger, start_web_server, BotConfig, WebState};
use freelancetm::telegram::bot::{create_bot, register_webhook, remove_webhook};
use freelancetm::telegram::{BotApi, TelegramApi};

/// Main entry point for the FreelanceTM bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, bot creation, binding the port).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    init_logger(&config::LOG_LEVEL, config::LOG_FILE_PATH.as_deref())?;

    let bot_config = BotConfig::from_env();
    bot_config.log_summary();

    match cli.command {
        Some(Commands::Serve { port }) => run_server(bot_config, port).await,
        Some(Commands::SetWebhook { url }) => run_set_webhook(&bot_config, &url).await,
        Some(Commands::DeleteWebhook) => run_delete_webhook(&bot_config).await,
        Some(Commands::Info) => run_info(&bot_config).await,
        None => {
            log::info!("No command specified, running the webhook server");
            run_server(bot_config, None).await
        }
    }
}

async fn run_server(bot_config: BotConfig, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(bot_config.port);
    let state = WebState::from_config(bot_config)?;
    start_web_server(port, state).await
}

fn required_token(bot_config: &BotConfig) -> Result<&str> {
    bot_config.bot_token.as_deref().context("BOT_TOKEN is not set")
}

async fn run_set_webhook(bot_config: &BotConfig, base_url: &str) -> Result<()> {
    let token = required_token(bot_config)?;
    let bot = create_bot(token)?;
    register_webhook(&bot, base_url, token, bot_config.webhook_secret.as_deref()).await?;
    println!("Webhook registered for {}", base_url);
    Ok(())
}

async fn run_delete_webhook(bot_config: &BotConfig) -> Result<()> {
    let bot = create_bot(required_token(bot_config)?)?;
    remove_webhook(&bot).await?;
    println!("Webhook removed");
    Ok(())
}

async fn run_info(bot_config: &BotConfig) -> Result<()> {
    let api = BotApi::new(create_bot(required_token(bot_config)?)?);
    let info = api.bot_info().await?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
