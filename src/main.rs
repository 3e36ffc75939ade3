//! Assessment prompt server entry point.
//!
//! Loads configuration, initializes logging, opens the prompt database and
//! serves MCP over the configured transport.

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use assessment_prompt_server::core::{AppContext, Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!(database = ?config.database, "Opening prompt repository");

    let ctx = AppContext::connect(config.clone())
        .await
        .context("failed to open the prompt database")?;

    let server = McpServer::new(ctx);
    info!(
        default_model = %config.prompts.default_model,
        "Server initialized"
    );

    TransportService::new(config.transport).run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` directives are honored; the configured level is added on top.
/// Output goes to stderr so the STDIO transport keeps stdout to itself.
fn init_logging(level: &str) {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
