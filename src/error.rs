//! Error taxonomy for documentation lookups, with context wrapping.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocsError {
    /// The registry answered but carried no usable version, or the lookup itself failed.
    #[error("could not resolve a version for crate `{crate_name}`: {reason}")]
    VersionResolution { crate_name: String, reason: String },

    /// Every candidate URL answered with a soft miss.
    #[error(
        "documentation for {crate_name} {version} not found: none of the {tried} candidate layouts matched (last: {last_miss})"
    )]
    DocumentNotFound {
        crate_name: String,
        version: String,
        tried: usize,
        last_miss: String,
    },

    /// Any other network or HTTP failure. Never masked by remaining candidates.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("item path `{0}` has no segments")]
    InvalidItemPath(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A lower-level error annotated with the operation it surfaced from.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<DocsError>,
    },
}

impl DocsError {
    /// The innermost error once every layer of context is peeled off.
    pub fn root(&self) -> &DocsError {
        match self {
            DocsError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Attaches operation context to an error as it crosses a layer boundary.
pub trait ResultExt<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T, DocsError>;

    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T, DocsError>;
}

impl<T> ResultExt<T> for Result<T, DocsError> {
    fn context<C: Into<String>>(self, context: C) -> Result<T, DocsError> {
        self.map_err(|source| DocsError::Context {
            context: context.into(),
            source: Box::new(source),
        })
    }

    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T, DocsError> {
        self.map_err(|source| DocsError::Context {
            context: f().into(),
            source: Box::new(source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_keeps_message_chain() {
        let inner: Result<(), DocsError> = Err(DocsError::VersionResolution {
            crate_name: "serde".to_string(),
            reason: "no max_version field".to_string(),
        });
        let err = inner
            .context("resolving version")
            .with_context(|| "get_crate_overview(serde)")
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "get_crate_overview(serde): resolving version: could not resolve a version for crate `serde`: no max_version field"
        );
        assert!(matches!(err.root(), DocsError::VersionResolution { .. }));
    }

    #[test]
    fn test_document_not_found_names_crate_and_version() {
        let err = DocsError::DocumentNotFound {
            crate_name: "nonexistent-crate-xyz".to_string(),
            version: "0.1.0".to_string(),
            tried: 3,
            last_miss: "404 Not Found at http://host/x".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("nonexistent-crate-xyz 0.1.0"));
        assert!(message.contains("none of the 3 candidate layouts matched"));
    }
}
