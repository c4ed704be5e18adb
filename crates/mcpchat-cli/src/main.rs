//! `mcpchat`: interactive chat with an LLM that can drive an MCP tool server
//!
//! No flags. Settings come from `~/.config/mcpchat/config.yaml` (or the file
//! named by `MCPCHAT_CONFIG`) and `MCPCHAT_*` overrides; the API key comes
//! from the environment or a `.env` file in the working directory.

use std::process::ExitCode;
use std::sync::Arc;

use mcpchat_core::chat::{resolve_api_key, ChatResult, Session};
use mcpchat_core::config::FileConfigProvider;
use mcpchat_core::logging::{ConsoleLogger, Logger, SharedLogger};
use mcpchat_core::mcp::McpClient;
use mcpchat_core::providers::GenaiProvider;
use mcpchat_core::secrets::{ChainSecretStore, SecretStore};
use mcpchat_core::shell::run_shell;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ChatResult<()> {
    let config = FileConfigProvider::discover().load_effective()?;
    let logger: SharedLogger = Arc::new(ConsoleLogger::new().with_level(config.log_level));

    // Credential first: a missing key must fail before anything is launched
    let secrets = ChainSecretStore::standard()?;
    let api_key = resolve_api_key(&config.provider, &secrets)?;
    if let Some(store) = secrets.find_store(&config.provider) {
        mcpchat_core::log_debug!(logger, "[Startup] API key for {} from {}", config.provider, store.name());
    }

    if !GenaiProvider::supports(&config.provider) {
        logger.warn(&format!(
            "[Startup] Provider '{}' is not a known genai adapter; the request may fail",
            config.provider
        ));
    }

    logger.info(&format!("[Startup] Starting tool server: {}", config.server));
    let client = McpClient::connect(&config.server, logger.clone()).await?;
    if let Some(info) = client.server_info() {
        logger.info(&format!("[Startup] Connected to {} {}", info.name, info.version));
    }

    let model = GenaiProvider::new(&config.provider, logger.clone());
    let mut session = Session::start(Box::new(model), Box::new(client), config, api_key, logger).await?;

    run_shell(&mut session, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
