//! The four documentation queries, end to end.
//!
//! Each call resolves a version, builds candidate paths, fetches the first
//! page that exists, then either extracts and renders a fragment or
//! classifies the page's links. Calls share nothing except the HTTP client and
//! the immutable [`ClientConfig`].

use reqwest::Client;
use scraper::Html;
use url::Url;

use crate::candidates::{self, DocTarget, ItemKind, ItemPath};
use crate::classify::{self, ItemFilter, ItemRecord};
use crate::config::ClientConfig;
use crate::error::{DocsError, ResultExt};
use crate::extract::{self, ExtractMode};
use crate::fetcher::{self, FetchedPage};
use crate::markdown::to_markdown;
use crate::registry::{self, CrateSummary, SortKey};
use crate::version::resolve_version;

/// HTML selected from a fetched page, together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFragment {
    pub html: String,
    pub source_url: String,
}

impl DocumentFragment {
    fn from_page(page: &FetchedPage, mode: ExtractMode) -> Self {
        Self {
            html: extract::extract_from_str(&page.html, mode),
            source_url: page.url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocsRsClient {
    client: Client,
    config: ClientConfig,
}

impl DocsRsClient {
    pub fn new(config: ClientConfig) -> Result<Self, DocsError> {
        let client = config.build_http_client()?;
        Ok(Self { client, config })
    }

    /// Searches the registry and renders the hits as a Markdown list.
    pub async fn search_crates(
        &self,
        query: &str,
        per_page: Option<u32>,
        sort: Option<SortKey>,
    ) -> Result<String, DocsError> {
        tracing::info!(query, "search_crates");
        let hits = registry::search_crates(
            &self.client,
            &self.config,
            query,
            per_page,
            sort.unwrap_or_default(),
        )
        .await
        .with_context(|| format!("search_crates(\"{query}\")"))?;

        Ok(render_crate_list(query, &hits))
    }

    /// Renders the crate's landing-page description.
    pub async fn crate_overview(
        &self,
        crate_name: &str,
        version: Option<&str>,
    ) -> Result<String, DocsError> {
        tracing::info!(crate_name, ?version, "get_crate_overview");
        self.overview_inner(crate_name, version)
            .await
            .with_context(|| format!("get_crate_overview({crate_name})"))
    }

    async fn overview_inner(
        &self,
        crate_name: &str,
        version: Option<&str>,
    ) -> Result<String, DocsError> {
        let version = resolve_version(&self.client, &self.config, crate_name, version).await?;
        let candidates = candidates::candidate_paths(crate_name, &version, &DocTarget::Overview);
        let page = self.fetch(&candidates, crate_name, &version).await?;

        let fragment = DocumentFragment::from_page(&page, ExtractMode::Overview);
        Ok(render_document(
            &format!("{crate_name} {version}"),
            &fragment,
        ))
    }

    /// Renders a single item's page.
    pub async fn item_docs(
        &self,
        crate_name: &str,
        kind: ItemKind,
        item_path: &str,
        version: Option<&str>,
    ) -> Result<String, DocsError> {
        tracing::info!(crate_name, item_path, %kind, ?version, "get_item_docs");
        self.item_inner(crate_name, kind, item_path, version)
            .await
            .with_context(|| format!("get_item_docs({crate_name}, {kind} {item_path})"))
    }

    async fn item_inner(
        &self,
        crate_name: &str,
        kind: ItemKind,
        item_path: &str,
        version: Option<&str>,
    ) -> Result<String, DocsError> {
        let path = ItemPath::parse(item_path)
            .ok_or_else(|| DocsError::InvalidItemPath(item_path.to_string()))?;
        let version = resolve_version(&self.client, &self.config, crate_name, version).await?;
        let target = DocTarget::Item { kind, path: &path };
        let candidates = candidates::candidate_paths(crate_name, &version, &target);
        let page = self.fetch(&candidates, crate_name, &version).await?;

        let fragment = DocumentFragment::from_page(&page, ExtractMode::Item);
        Ok(render_document(&format!("{path} ({kind})"), &fragment))
    }

    /// Lists the crate's items whose names match `query`, optionally narrowed by kind.
    pub async fn search_in_crate(
        &self,
        crate_name: &str,
        query: &str,
        version: Option<&str>,
        kind: Option<&str>,
    ) -> Result<String, DocsError> {
        tracing::info!(crate_name, query, ?kind, ?version, "search_in_crate");
        self.search_in_crate_inner(crate_name, query, version, kind)
            .await
            .with_context(|| format!("search_in_crate({crate_name}, \"{query}\")"))
    }

    async fn search_in_crate_inner(
        &self,
        crate_name: &str,
        query: &str,
        version: Option<&str>,
        kind: Option<&str>,
    ) -> Result<String, DocsError> {
        let version = resolve_version(&self.client, &self.config, crate_name, version).await?;
        let candidates = candidates::candidate_paths(crate_name, &version, &DocTarget::AllItems);
        let page = self.fetch(&candidates, crate_name, &version).await?;

        let base = Url::parse(&candidates::crate_docs_base(
            &self.config.docs_base_url,
            crate_name,
            &version,
        ))?;
        let records = scan_page(&page, &base, &ItemFilter::new(Some(query), kind));
        tracing::debug!(crate_name, matched = records.len(), "Scanned item index");

        Ok(render_item_list(crate_name, &version, query, &records))
    }

    async fn fetch(
        &self,
        candidates: &[String],
        crate_name: &str,
        version: &str,
    ) -> Result<FetchedPage, DocsError> {
        fetcher::fetch_first(
            &self.client,
            &self.config.docs_base_url,
            candidates,
            crate_name,
            version,
        )
        .await
    }
}

fn scan_page(page: &FetchedPage, base: &Url, filter: &ItemFilter) -> Vec<ItemRecord> {
    let document = Html::parse_document(&page.html);
    classify::scan_items(&document, base, filter)
}

/// Placeholder for a page that was fetched but held nothing extractable.
pub fn no_content(url: &str) -> String {
    format!("No content found at {url}")
}

pub fn render_document(title: &str, fragment: &DocumentFragment) -> String {
    let body = to_markdown(&fragment.html);
    if body.is_empty() {
        return no_content(&fragment.source_url);
    }
    format!("# {title}\n\nSource: {}\n\n{body}\n", fragment.source_url)
}

pub fn render_crate_list(query: &str, hits: &[CrateSummary]) -> String {
    if hits.is_empty() {
        return format!("No crates found matching \"{query}\"");
    }

    let mut out = format!("# Crate search results for \"{query}\"\n");
    for hit in hits {
        out.push_str(&format!(
            "\n## {} (v{})\n\n{}\n\nDownloads: {}\n",
            hit.name, hit.version, hit.description, hit.downloads
        ));
        if let Some(docs) = &hit.documentation {
            out.push_str(&format!("Documentation: {docs}\n"));
        }
    }
    out
}

pub fn render_item_list(
    crate_name: &str,
    version: &str,
    query: &str,
    records: &[ItemRecord],
) -> String {
    if records.is_empty() {
        return format!("No matching items found for \"{query}\" in {crate_name} {version}");
    }

    let mut out = format!("# Items in {crate_name} {version} matching \"{query}\"\n\n");
    for record in records {
        out.push_str(&format!(
            "- [{}]({}) ({})\n",
            record.name, record.link, record.kind
        ));
    }
    out
}
