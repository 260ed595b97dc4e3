//! Static configuration shared by every outbound request.
//!
//! A [`ClientConfig`] is built once at startup and handed by reference to
//! each component. Nothing in it changes for the lifetime of the process.

use std::time::Duration;

use reqwest::Client;

use crate::error::DocsError;

/// Default documentation host.
pub const DOCS_RS_BASE_URL: &str = "https://docs.rs";

/// Default registry API root.
pub const CRATES_IO_API_URL: &str = "https://crates.io/api/v1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variables consulted for an outbound proxy, in priority order.
const PROXY_ENV_VARS: [&str; 6] = [
    "HTTPS_PROXY",
    "https_proxy",
    "HTTP_PROXY",
    "http_proxy",
    "ALL_PROXY",
    "all_proxy",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the documentation host, without a trailing slash.
    pub docs_base_url: String,
    /// Root of the registry API, without a trailing slash.
    pub registry_base_url: String,
    /// Value sent in the `User-Agent` header. crates.io rejects anonymous clients.
    pub user_agent: String,
    /// Timeout applied to each individual HTTP attempt.
    pub timeout: Duration,
    /// Proxy URL applied to every outbound request, if any.
    pub proxy: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            docs_base_url: DOCS_RS_BASE_URL.to_string(),
            registry_base_url: CRATES_IO_API_URL.to_string(),
            user_agent: default_user_agent(),
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
        }
    }
}

impl ClientConfig {
    /// Defaults plus the first proxy variable found in the process environment.
    pub fn from_env() -> Self {
        Self {
            proxy: proxy_from(|key| std::env::var(key).ok()),
            ..Self::default()
        }
    }

    pub fn with_docs_base_url(mut self, url: impl Into<String>) -> Self {
        self.docs_base_url = trim_base(url.into());
        self
    }

    pub fn with_registry_base_url(mut self, url: impl Into<String>) -> Self {
        self.registry_base_url = trim_base(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Builds the single HTTP client used for the lifetime of the process.
    pub fn build_http_client(&self) -> Result<Client, DocsError> {
        // Only the proxy captured in this config applies; reqwest's own env lookup is off.
        let mut builder = Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .no_proxy();

        if let Some(proxy) = &self.proxy {
            tracing::info!(proxy = %proxy, "Routing outbound requests through proxy");
            let proxy = reqwest::Proxy::all(proxy.as_str()).map_err(|source| DocsError::Transport {
                url: proxy.clone(),
                source,
            })?;
            builder = builder.proxy(proxy);
        }

        builder.build().map_err(|source| DocsError::Transport {
            url: self.docs_base_url.clone(),
            source,
        })
    }
}

fn default_user_agent() -> String {
    format!(
        "{}/{} (+{})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_REPOSITORY")
    )
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn proxy_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    PROXY_ENV_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
