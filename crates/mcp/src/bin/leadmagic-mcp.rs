// Standalone MCP server binary

use anyhow::Result;
use leadmagic_mcp::config::{McpConfig, API_KEY_VAR};
use leadmagic_mcp::server::McpServer;
use leadmagic_mcp::tools::{register_all, ToolRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match McpConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("leadmagic-mcp: {:#}", e);
            eprintln!();
            eprintln!("To fix this:");
            eprintln!("  1. Get an API key from your LeadMagic dashboard.");
            eprintln!("  2. Set {} in the MCP server's environment,", API_KEY_VAR);
            eprintln!("     e.g. in the \"env\" block of your MCP client configuration.");
            eprintln!("  3. Restart the MCP client.");
            std::process::exit(1);
        }
    };

    // stdout carries the protocol, so logs go to stderr
    let default_filter = if config.debug {
        "leadmagic_mcp=debug,leadmagic_sdk=debug"
    } else {
        "leadmagic_mcp=info,leadmagic_sdk=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    tracing::info!("LeadMagic MCP Server starting...");
    tracing::debug!(config = ?config, "Loaded configuration");

    let client = config.client()?;

    let mut registry = ToolRegistry::new();
    register_all(&mut registry, &client);
    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry);
    tokio::select! {
        result = server.start() => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Received Ctrl-C, shutting down"),
    }

    Ok(())
}
