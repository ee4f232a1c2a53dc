use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use sidekiq_push_cli::Cli;
use sidekiq_push_cli::commands;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    setup_logging(&cli)?;

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => e.exit(),
    };

    if cli.retry_unrecognized() {
        warn!("Ignoring unrecognized retry option, falling back to the default");
    }

    match commands::execute(settings, cli.redis_url.as_deref()).await {
        Ok(true) => {
            debug!("✅ Command completed successfully");
        }
        Ok(false) => {
            std::process::exit(1);
        }
        Err(e) => {
            error!("❌ Command failed: {:#}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    let env_filter = EnvFilter::from_default_env()
        .add_directive(format!("sidekiq_push_cli={}", log_level).parse()?)
        .add_directive(format!("sidekiq_push={}", log_level).parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    Ok(())
}
