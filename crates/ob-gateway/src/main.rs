//! ob-gateway: onboarding assistant main binary
//!
//! Usage:
//!   ob-gateway                    - Start the HTTP API server
//!   ob-gateway --cli [SESSION_ID] - Start interactive CLI mode
//!   ob-gateway --help             - Show help

mod cli;

use std::sync::Arc;

use ob_core::{ChatService, ClaudeAgent, ClaudeClient, Config, SessionStore, ToolManager};
use ob_users::{register_user_tools, UserStore};
use tracing_subscriber::EnvFilter;

const DEFAULT_CLI_SESSION: &str = "cli";

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// HTTP API server
    Server,
    /// Interactive CLI bound to one session
    Cli(String),
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = parse_args(std::env::args().skip(1));

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("ob-gateway {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting ob-gateway...");
    tracing::info!("Model: {}", config.llm.model);

    let (chat, users) = build_services(&config)?;

    match mode {
        RunMode::Cli(session_id) => {
            tracing::info!("Running in CLI mode");
            cli::run_cli(chat, users, session_id).await
        }
        RunMode::Server => run_server(&config, chat).await,
        _ => Ok(()),
    }
}

/// Parse command line arguments (program name excluded)
fn parse_args<I>(args: I) -> RunMode
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--cli" | "-c" => {
                let session_id = args
                    .next_if(|next| !next.starts_with('-'))
                    .unwrap_or_else(|| DEFAULT_CLI_SESSION.to_string());
                return RunMode::Cli(session_id);
            }
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Server
}

fn print_help() {
    println!("ob-gateway - onboarding assistant gateway");
    println!();
    println!("Usage:");
    println!("  ob-gateway                     Start the HTTP API server");
    println!("  ob-gateway --cli [SESSION_ID]  Start interactive CLI mode (default session: {})", DEFAULT_CLI_SESSION);
    println!("  ob-gateway --help              Show this help message");
    println!("  ob-gateway --version           Show version");
    println!();
    println!("Configuration is read from {} when present.", ob_core::config::CONFIG_FILE);
    println!();
    println!("Environment Variables:");
    println!("  LLM_API_KEY          API key (required, CLAUDE_API_KEY also accepted)");
    println!("  LLM_MODEL            Model name (default: claude-sonnet-4-20250514)");
    println!("  LLM_BASE_URL         Custom API endpoint");
    println!("  LLM_MAX_TOKENS       Max tokens per response (default: 4096)");
    println!("  LLM_TEMPERATURE      Sampling temperature (default: 0.0)");
    println!("  LLM_MAX_ITERATIONS   Model calls per chat turn (default: 10)");
    println!("  API_PORT             HTTP API port (default: 8000)");
    println!("  API_ALLOWED_ORIGINS  Comma-separated CORS origins (default: any)");
    println!("  USERS_DIR            User record directory (default: users)");
    println!("  SESSIONS_DIR         Session directory (default: sessions)");
}

/// Wire stores, tools and the agent into a chat service
fn build_services(config: &Config) -> anyhow::Result<(Arc<ChatService>, Arc<UserStore>)> {
    let users = Arc::new(UserStore::new(&config.storage.users_dir));

    let mut tool_manager = ToolManager::new();
    register_user_tools(&mut tool_manager, Arc::clone(&users));
    tracing::info!(
        "Registered {} tools: {:?}",
        tool_manager.len(),
        tool_manager.tool_names()
    );

    let client = ClaudeClient::new(&config.llm)
        .map_err(|e| anyhow::anyhow!("Failed to create LLM client: {}", e))?;
    let agent = ClaudeAgent::new(client, &config.llm);

    let sessions = SessionStore::new(&config.storage.sessions_dir);
    tracing::info!(
        "Storage: users in {}, sessions in {}",
        users.base_path().display(),
        sessions.base_path().display()
    );

    let chat = ChatService::new(sessions, Arc::new(tool_manager), Arc::new(agent));
    Ok((Arc::new(chat), users))
}

/// Run the HTTP API until Ctrl+C
async fn run_server(config: &Config, chat: Arc<ChatService>) -> anyhow::Result<()> {
    tracing::info!("Press Ctrl+C to exit");

    ob_api::start_server(&config.api, chat, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
        tracing::info!("Shutting down...");
    })
    .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
