//! dbot CLI: run the Telegram bot or print stored group chats. Config from env and optional CLI args.

use anyhow::Result;
use clap::Parser;
use dbot_cli::{load_config, print_groupchats, run_bot, Cli, Commands};
use dbot_core::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Groupchats {
            states,
            database_url,
        } => {
            init_tracing(None, "warn")?;

            let database_url = database_url
                .or_else(|| std::env::var("DATABASE_URL").ok())
                .unwrap_or_else(|| dbot_telegram::DEFAULT_DATABASE_URL.to_string());
            print_groupchats(&database_url, &states).await
        }
    }
}
