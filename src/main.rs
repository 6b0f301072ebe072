use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use taskbridge::cli::{Cli, Commands};
use taskbridge::client::{AuthToken, TodoClient};
use taskbridge::commands::dispatch;
use taskbridge::config::Config;
use taskbridge::gateway;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            let port = port.unwrap_or(config.gateway.port);
            gateway::run_gateway(&host, port, &config).await
        }
        Commands::Chat { message, token } => {
            let client = TodoClient::new(&config.backend.base_url, config.backend.timeout_secs);
            let auth = AuthToken::new(token);
            let reply = dispatch(&client, &auth, &message).await;
            println!("{}", reply.message);
            if reply.succeeded {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
    }
}
