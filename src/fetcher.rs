//! Walks a candidate list against the documentation host.
//!
//! Each attempt ends in exactly one [`Attempt`] outcome. `404 Not Found` and
//! `501 Not Implemented` are soft misses and move on to the next candidate;
//! anything else that is not a success aborts the whole resolution.

use reqwest::{Client, StatusCode};

use crate::error::DocsError;

/// A successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Absolute URL the body was served from.
    pub url: String,
    pub html: String,
}

/// Outcome of a single candidate request.
#[derive(Debug)]
pub enum Attempt {
    Found(FetchedPage),
    SoftMiss { url: String, status: StatusCode },
    Fatal(DocsError),
}

/// Statuses that mean "not at this layout, try the next one".
pub fn is_soft_miss(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND || status == StatusCode::NOT_IMPLEMENTED
}

/// Requests one absolute URL and classifies the result.
pub async fn attempt(client: &Client, url: &str) -> Attempt {
    tracing::debug!(url, "Trying documentation candidate");

    let response = match client
        .get(url)
        .header("Accept", "text/html")
        .send()
        .await
    {
        Ok(response) => response,
        Err(source) => {
            return Attempt::Fatal(DocsError::Transport {
                url: url.to_string(),
                source,
            });
        }
    };

    let status = response.status();
    if is_soft_miss(status) {
        return Attempt::SoftMiss {
            url: url.to_string(),
            status,
        };
    }

    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(source) => {
            return Attempt::Fatal(DocsError::Transport {
                url: url.to_string(),
                source,
            });
        }
    };

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(html) => Attempt::Found(FetchedPage {
            url: final_url,
            html,
        }),
        Err(source) => Attempt::Fatal(DocsError::Transport {
            url: url.to_string(),
            source,
        }),
    }
}

/// Tries every candidate path in order, one at a time, and returns the first
/// page served. `crate_name` and `version` only feed the not-found error.
pub async fn fetch_first(
    client: &Client,
    docs_base_url: &str,
    candidates: &[String],
    crate_name: &str,
    version: &str,
) -> Result<FetchedPage, DocsError> {
    let mut last_miss = String::from("no candidates");

    for path in candidates {
        let url = format!("{}/{}", docs_base_url, path.trim_start_matches('/'));
        match attempt(client, &url).await {
            Attempt::Found(page) => {
                tracing::debug!(url = %page.url, "Documentation candidate matched");
                return Ok(page);
            }
            Attempt::SoftMiss { url, status } => {
                tracing::debug!(url = %url, %status, "Candidate soft miss");
                last_miss = format!("{status} at {url}");
            }
            Attempt::Fatal(err) => return Err(err),
        }
    }

    tracing::warn!(crate_name, version, tried = candidates.len(), "No candidate layout matched");
    Err(DocsError::DocumentNotFound {
        crate_name: crate_name.to_string(),
        version: version.to_string(),
        tried: candidates.len(),
        last_miss,
    })
}
