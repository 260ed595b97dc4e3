//! Tool-protocol adapter.
//!
//! Exposes the documentation queries of [`DocsRsClient`] as MCP tools. Every
//! tool either returns a text payload (including "nothing found" messages) or
//! an internal protocol error carrying the composed error message.
//!
//! # Example
//! ```no_run
//! use docsrs_mcp::config::ClientConfig;
//! use docsrs_mcp::docs_parser::DocsRsClient;
//! use docsrs_mcp::mcp::DocFetcher;
//!
//! fn example() -> Result<(), docsrs_mcp::error::DocsError> {
//!     let client = DocsRsClient::new(ClientConfig::from_env())?;
//!     let _fetcher = DocFetcher::new(client);
//!     Ok(())
//! }
//! ```

use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{Error as McpError, ServerHandler, schemars, tool};
use serde::Deserialize;

use crate::candidates::ItemKind;
use crate::docs_parser::DocsRsClient;
use crate::error::DocsError;
use crate::registry::SortKey;

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct SearchCratesParams {
    #[schemars(description = "Free-text search query")]
    pub query: String,
    #[schemars(description = "Number of results to return (default 10, at most 100)")]
    #[serde(default)]
    pub per_page: Option<u32>,
    #[schemars(
        description = "Sort order: relevance, downloads, recent-downloads, recent-updates or new (default relevance)"
    )]
    #[serde(default)]
    pub sort: Option<SortKey>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct CrateOverviewParams {
    #[schemars(description = "Name of the crate")]
    pub crate_name: String,
    #[schemars(description = "Version of the crate, e.g. 1.0.0. Defaults to latest.")]
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct ItemDocsParams {
    #[schemars(description = "Name of the crate")]
    pub crate_name: String,
    #[schemars(
        description = "Kind of item: struct, enum, trait, fn, macro, type, constant, static or module"
    )]
    pub item_type: ItemKind,
    #[schemars(
        description = "Full path of the item including the crate, e.g. tokio::sync::Mutex or tokio::sync for a module"
    )]
    pub item_path: String,
    #[schemars(description = "Version of the crate, e.g. 1.0.0. Defaults to latest.")]
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct SearchInCrateParams {
    #[schemars(description = "Name of the crate")]
    pub crate_name: String,
    #[schemars(description = "Case-insensitive substring of the item name")]
    pub query: String,
    #[schemars(description = "Version of the crate, e.g. 1.0.0. Defaults to latest.")]
    #[serde(default)]
    pub version: Option<String>,
    #[schemars(
        description = "Optional kind filter: struct, trait, function, enum, type, constant, static or macro"
    )]
    #[serde(default)]
    pub item_type: Option<String>,
}

/// MCP service answering documentation queries against docs.rs and crates.io.
#[derive(Debug, Clone)]
pub struct DocFetcher {
    client: DocsRsClient,
}

#[tool(tool_box)]
impl DocFetcher {
    pub fn new(client: DocsRsClient) -> Self {
        Self { client }
    }

    #[tool(description = "Search crates.io for crates matching a query")]
    async fn search_crates(
        &self,
        #[tool(aggr)] params: SearchCratesParams,
    ) -> Result<CallToolResult, McpError> {
        into_tool_result(
            self.client
                .search_crates(&params.query, params.per_page, params.sort)
                .await,
        )
    }

    #[tool(description = "Get the overview documentation of a crate from docs.rs, as Markdown")]
    async fn get_crate_overview(
        &self,
        #[tool(aggr)] params: CrateOverviewParams,
    ) -> Result<CallToolResult, McpError> {
        into_tool_result(
            self.client
                .crate_overview(&params.crate_name, params.version.as_deref())
                .await,
        )
    }

    #[tool(description = "Get the documentation of a single item (struct, trait, fn, module...) from docs.rs, as Markdown")]
    async fn get_item_docs(
        &self,
        #[tool(aggr)] params: ItemDocsParams,
    ) -> Result<CallToolResult, McpError> {
        into_tool_result(
            self.client
                .item_docs(
                    &params.crate_name,
                    params.item_type,
                    &params.item_path,
                    params.version.as_deref(),
                )
                .await,
        )
    }

    #[tool(description = "Search the items of a crate by name, optionally filtered by kind")]
    async fn search_in_crate(
        &self,
        #[tool(aggr)] params: SearchInCrateParams,
    ) -> Result<CallToolResult, McpError> {
        into_tool_result(
            self.client
                .search_in_crate(
                    &params.crate_name,
                    &params.query,
                    params.version.as_deref(),
                    params.item_type.as_deref(),
                )
                .await,
        )
    }
}

#[tool(tool_box)]
impl ServerHandler for DocFetcher {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "This server provides Rust crate documentation from docs.rs and crates.io. \
                Use 'search_crates' to find crates, 'get_crate_overview' for a crate's front page, \
                'get_item_docs' for a specific item and 'search_in_crate' to find items by name. \
                Versions default to the latest release."
                    .to_string(),
            ),
        }
    }
}

/// Text payloads become successful results; errors become internal protocol
/// errors carrying the full message chain.
fn into_tool_result(result: Result<String, DocsError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(err) => {
            tracing::error!(error = %err, "Tool call failed");
            Err(McpError::internal_error(err.to_string(), None))
        }
    }
}
