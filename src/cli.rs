use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "freelancetm")]
#[command(author, version, about = "FreelanceTM Telegram bot webhook server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the webhook HTTP server (default)
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Register `<url>/<BOT_TOKEN>` as the bot's webhook
    SetWebhook {
        /// Public base URL of the deployment, e.g. https://example.vercel.app
        #[arg(long)]
        url: String,
    },

    /// Remove the bot's webhook
    DeleteWebhook,

    /// Print bot identity and webhook status
    Info,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_optional() {
        let cli = Cli::try_parse_from(["freelancetm"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["freelancetm", "serve", "--port", "8080"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Serve { port: Some(8080) }));
    }

    #[test]
    fn set_webhook_requires_url() {
        assert!(Cli::try_parse_from(["freelancetm", "set-webhook"]).is_err());
        let cli = Cli::try_parse_from(["freelancetm", "set-webhook", "--url", "https://x.app"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::SetWebhook {
                url: "https://x.app".to_string()
            })
        );
    }
}
