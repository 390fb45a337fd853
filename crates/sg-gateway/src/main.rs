//! shopgate: product search chat bot
//!
//! Usage:
//!   shopgate                   - Run the Telegram bot
//!   shopgate --cli             - Start interactive CLI mode
//!   shopgate --exec "<cmd>"    - Run a single bot command and print the replies
//!   shopgate --help            - Show help

mod cli;

use std::sync::Arc;

use sg_core::{Config, Dispatcher, EbayClient, PaginationEngine, SessionStore};
use sg_telegram::TelegramBot;
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Telegram bot
    Bot,
    /// Interactive CLI mode
    Cli,
    /// One-shot command
    Exec(String),
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = parse_args(&args)?;

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("shopgate {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // keep the REPL readable unless RUST_LOG asks for more
    let default_level = match mode {
        RunMode::Bot => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting shopgate...");
    tracing::info!(
        "Marketplace: {}, currency: {}, page size: {}",
        config.search.marketplace_id,
        config.search.currency,
        config.search.page_size
    );

    let dispatcher = build_dispatcher(&config)?;

    match mode {
        RunMode::Cli => cli::run_cli(dispatcher).await,
        RunMode::Exec(command) => cli::run_execute(&dispatcher, &command).await,
        RunMode::Bot => run_bot(&config, dispatcher).await,
        RunMode::Help | RunMode::Version => Ok(()),
    }
}

/// Parse command line arguments
fn parse_args(args: &[String]) -> anyhow::Result<RunMode> {
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--cli" | "-c" => return Ok(RunMode::Cli),
            "--exec" | "-e" => {
                let command = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--exec requires a command, e.g. --exec \"/search shoes\""))?;
                return Ok(RunMode::Exec(command.clone()));
            }
            "--help" | "-h" => return Ok(RunMode::Help),
            "--version" | "-v" => return Ok(RunMode::Version),
            _ => {}
        }
    }

    Ok(RunMode::Bot)
}

/// Print help message
fn print_help() {
    println!("shopgate - product search chat bot");
    println!();
    println!("Usage:");
    println!("  shopgate                  Run the Telegram bot");
    println!("  shopgate --cli            Start interactive CLI mode");
    println!("  shopgate --exec \"<cmd>\"   Run one bot command and print the replies");
    println!("  shopgate --help           Show this help message");
    println!("  shopgate --version        Show version");
    println!();
    println!("Configuration is read from ./shopgate.toml, ./conf.json or the environment.");
    println!();
    println!("Environment Variables:");
    println!("  TELEGRAM_BOT_TOKEN     Telegram bot token (required for bot mode)");
    println!("  EBAY_ACCESS_TOKEN      eBay Browse API access token (required)");
    println!("  EBAY_BASE_URL          Browse API root (default: https://api.ebay.com/buy/browse/v1)");
    println!("  EBAY_MARKETPLACE_ID    Marketplace (default: EBAY_IT)");
    println!("  EBAY_CURRENCY          Price currency (default: EUR)");
    println!("  SEARCH_PAGE_SIZE       Products per page (default: 5)");
    println!("  SEARCH_TIMEOUT_SECS    Search request timeout (default: 15)");
    println!("  RUST_LOG               Log filter (default: info)");
}

/// Wire the search client, session store and dispatcher together
fn build_dispatcher(config: &Config) -> anyhow::Result<Dispatcher> {
    let client = EbayClient::new(&config.search)
        .map_err(|e| anyhow::anyhow!("Failed to create search client: {}", e))?;
    let page_size = client.page_size();

    let engine = PaginationEngine::new(Arc::new(client), page_size);
    Ok(Dispatcher::new(SessionStore::new(), engine))
}

/// Run the Telegram bot until Ctrl+C
async fn run_bot(config: &Config, dispatcher: Dispatcher) -> anyhow::Result<()> {
    let token = config
        .telegram
        .token
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("TELEGRAM_BOT_TOKEN is not configured"))?;

    let bot = TelegramBot::new(token, dispatcher)?;
    bot.start().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(&args(&[])).unwrap(), RunMode::Bot);
        assert_eq!(parse_args(&args(&["--cli"])).unwrap(), RunMode::Cli);
        assert_eq!(parse_args(&args(&["-h"])).unwrap(), RunMode::Help);
        assert_eq!(parse_args(&args(&["--version"])).unwrap(), RunMode::Version);
        assert_eq!(
            parse_args(&args(&["--exec", "/search shoes"])).unwrap(),
            RunMode::Exec("/search shoes".to_string())
        );
    }

    #[test]
    fn test_exec_requires_command() {
        assert!(parse_args(&args(&["--exec"])).is_err());
    }

    #[test]
    fn test_build_dispatcher() {
        let mut config = Config::default();
        config.search.access_token = "token".to_string();
        let dispatcher = build_dispatcher(&config).unwrap();
        assert!(dispatcher.store().is_empty());
    }
}
