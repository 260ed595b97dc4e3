use rmcp::ServiceExt;
use rmcp::transport::sse_server::SseServer;
use rmcp::transport::stdio;
use tracing_subscriber::{self, layer::SubscriberExt, util::SubscriberInitExt};

use crate::docs_parser::DocsRsClient;
use crate::mcp::DocFetcher;

// stdout carries protocol frames in stdio mode, so logs always go to stderr
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
}

// start sse server
pub async fn start_sse_server(addr: &str, client: DocsRsClient) -> anyhow::Result<()> {
    tracing::info!(addr, "Starting MCP SSE server");

    let ct = SseServer::serve(addr.parse()?)
        .await?
        .with_service(move || DocFetcher::new(client.clone()));

    tokio::signal::ctrl_c().await?;
    ct.cancel();
    Ok(())
}

// start stdio server
pub async fn start_stdio_server(client: DocsRsClient) -> anyhow::Result<()> {
    tracing::info!("Starting MCP stdio server");

    let service = DocFetcher::new(client)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}
