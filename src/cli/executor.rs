//! Command executor for dispatching CLI commands
//!
//! Main entry point for running a parsed command once configuration is
//! loaded.

use super::handlers::ServeCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::Settings;

/// Execute a CLI command with merged and validated settings.
///
/// `serve` is the default when no subcommand is given.
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    warn_on_privileged_bind(&settings);

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
    }
}

fn warn_on_privileged_bind(settings: &Settings) {
    if settings.server.port < 1024 {
        tracing::warn!(
            port = settings.server.port,
            "Binding to a port below 1024 typically requires elevated privileges"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SurveyConfig, TwilioConfig};
    use clap::Parser;

    fn create_valid_config() -> Settings {
        Settings {
            twilio: TwilioConfig {
                account_sid: "ACtest".to_string(),
                auth_token: "secret".to_string(),
                phone_number: "+14155238886".to_string(),
                ..Default::default()
            },
            survey: SurveyConfig {
                link: "https://example.typeform.com/to/ABC123".to_string(),
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["survey-notify", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, create_valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run_reports_invalid_config() {
        let cli = Cli::try_parse_from(["survey-notify", "serve", "--dry-run"]).unwrap();
        let mut config = create_valid_config();
        config.twilio.phone_number.clear();

        assert!(execute_command(&cli, config).await.is_err());
    }
}
