//! Turns a caller-supplied version token into a concrete version string.

use reqwest::Client;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::{DocsError, ResultExt};

/// Sentinel accepted in place of a concrete version.
pub const LATEST: &str = "latest";

#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate", default)]
    krate: Option<CrateInfo>,
}

#[derive(Debug, Deserialize)]
struct CrateInfo {
    #[serde(default)]
    max_version: Option<String>,
    #[serde(default)]
    newest_version: Option<String>,
}

/// Returns `version` unchanged unless it is absent, blank or `latest`, in which
/// case the registry is asked for the newest published version.
///
/// Explicit versions are trusted as given and never validated.
pub async fn resolve_version(
    client: &Client,
    config: &ClientConfig,
    crate_name: &str,
    version: Option<&str>,
) -> Result<String, DocsError> {
    if let Some(explicit) = explicit_version(version) {
        return Ok(explicit.to_string());
    }

    let url = format!("{}/crates/{}", config.registry_base_url, crate_name);
    tracing::debug!(crate_name, url = %url, "Resolving latest version");

    let body: CrateResponse = fetch_json(client, &url)
        .await
        .with_context(|| format!("resolving latest version of `{crate_name}`"))?;

    let version = body
        .krate
        .and_then(|info| info.max_version.or(info.newest_version))
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| DocsError::VersionResolution {
            crate_name: crate_name.to_string(),
            reason: "registry response carried no version field".to_string(),
        })?;

    tracing::debug!(crate_name, version = %version, "Resolved latest version");
    Ok(version)
}

fn explicit_version(version: Option<&str>) -> Option<&str> {
    version
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(LATEST))
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: &str,
) -> Result<T, DocsError> {
    let transport = |source| DocsError::Transport {
        url: url.to_string(),
        source,
    };

    client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(transport)?
        .json::<T>()
        .await
        .map_err(transport)
}
