//! Crate search against the registry API.

use reqwest::Client;
use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::DocsError;

/// Upper bound the registry accepts for a page.
pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Substituted when a crate publishes no description.
pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Relevance,
    Downloads,
    RecentDownloads,
    RecentUpdates,
    New,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::Downloads => "downloads",
            SortKey::RecentDownloads => "recent-downloads",
            SortKey::RecentUpdates => "recent-updates",
            SortKey::New => "new",
        }
    }
}

/// One registry search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrateSummary {
    pub name: String,
    pub description: String,
    pub downloads: u64,
    pub version: String,
    pub documentation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    crates: Vec<RegistryCrate>,
}

#[derive(Debug, Deserialize)]
struct RegistryCrate {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    downloads: u64,
    #[serde(default)]
    max_version: Option<String>,
    #[serde(default)]
    newest_version: Option<String>,
    #[serde(default)]
    documentation: Option<String>,
}

impl From<RegistryCrate> for CrateSummary {
    fn from(krate: RegistryCrate) -> Self {
        let description = krate
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        Self {
            name: krate.name,
            description,
            downloads: krate.downloads,
            version: krate
                .max_version
                .or(krate.newest_version)
                .unwrap_or_default(),
            documentation: krate.documentation.filter(|d| !d.trim().is_empty()),
        }
    }
}

pub fn clamp_per_page(per_page: Option<u32>) -> u32 {
    per_page.unwrap_or(DEFAULT_PER_PAGE).min(MAX_PER_PAGE)
}

/// Issues a single search request and normalizes each hit. Never paginates.
pub async fn search_crates(
    client: &Client,
    config: &ClientConfig,
    query: &str,
    per_page: Option<u32>,
    sort: SortKey,
) -> Result<Vec<CrateSummary>, DocsError> {
    let url = format!("{}/crates", config.registry_base_url);
    let per_page = clamp_per_page(per_page);
    tracing::debug!(query, per_page, sort = sort.as_str(), "Searching registry");

    let transport = |source| DocsError::Transport {
        url: url.clone(),
        source,
    };

    let response: SearchResponse = client
        .get(&url)
        .header("Accept", "application/json")
        .query(&[
            ("q", query.to_string()),
            ("per_page", per_page.to_string()),
            ("sort", sort.as_str().to_string()),
        ])
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(transport)?
        .json()
        .await
        .map_err(transport)?;

    Ok(response.crates.into_iter().map(CrateSummary::from).collect())
}
