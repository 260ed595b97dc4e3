//! Rust Documentation MCP Service
//!
//! This crate exposes four documentation queries over docs.rs and crates.io to
//! MCP clients: registry search, crate overview, single-item docs and in-crate
//! item search. docs.rs gives no stable URL or HTML contract, so every lookup
//! walks an ordered list of candidate layouts and a cascade of extraction
//! strategies before rendering Markdown.
//!
//! # Modules
//!
//! - [`config`]: Static client configuration (hosts, timeout, proxy)
//! - [`error`]: Error taxonomy and context wrapping
//! - [`version`]: Resolution of `latest` to a concrete version
//! - [`candidates`]: Candidate documentation paths per lookup
//! - [`fetcher`]: Ordered candidate fetching with soft-miss fallback
//! - [`extract`]: Fragment extraction from rustdoc HTML
//! - [`markdown`]: HTML to Markdown rendering
//! - [`classify`]: Item classification, filtering and deduplication
//! - [`registry`]: crates.io search
//! - [`docs_parser`]: The public queries, end to end
//! - [`mcp`]: MCP tool adapter
//! - [`server`]: stdio and SSE transports

pub mod candidates;
pub mod classify;
pub mod config;
pub mod docs_parser;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod markdown;
pub mod mcp;
pub mod registry;
pub mod server;
pub mod version;
