use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use docsrs_mcp::config::ClientConfig;
use docsrs_mcp::docs_parser::DocsRsClient;
use docsrs_mcp::server;

#[derive(Parser, Debug)]
#[command(version, about = "Rust crate documentation MCP server (docs.rs + crates.io)")]
struct Cli {
    /// Type of server to run
    #[arg(short, long, value_enum, default_value_t = ServerType::Stdio)]
    server_type: ServerType,

    /// Address for the SSE server
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    address: String,

    /// Documentation host to scrape
    #[arg(long)]
    docs_base_url: Option<String>,

    /// Registry API root
    #[arg(long)]
    registry_base_url: Option<String>,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ServerType {
    /// Start an SSE server
    Sse,
    /// Start a stdio server
    Stdio,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config =
            ClientConfig::from_env().with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(url) = &self.docs_base_url {
            config = config.with_docs_base_url(url.clone());
        }
        if let Some(url) = &self.registry_base_url {
            config = config.with_registry_base_url(url.clone());
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    server::init_tracing();

    let client = DocsRsClient::new(cli.client_config())?;

    match cli.server_type {
        ServerType::Sse => server::start_sse_server(&cli.address, client).await?,
        ServerType::Stdio => server::start_stdio_server(client).await?,
    }

    Ok(())
}
