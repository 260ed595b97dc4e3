//! Candidate documentation paths for each kind of lookup.
//!
//! docs.rs has changed its output layout across rustdoc versions, so a single
//! logical target maps to an ordered list of paths. The order is significant:
//! earlier entries are the layouts seen most often.

use std::fmt;

use rmcp::schemars;
use serde::{Deserialize, Serialize};

/// Separator between segments of an item path.
pub const PATH_SEPARATOR: &str = "::";

/// Closed set of documentation item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Struct,
    Trait,
    #[serde(alias = "fn")]
    Function,
    Enum,
    #[serde(rename = "type")]
    TypeAlias,
    #[serde(alias = "const")]
    Constant,
    Static,
    Macro,
    #[serde(alias = "mod")]
    Module,
    #[serde(skip_deserializing)]
    Unrecognized,
}

impl ItemKind {
    /// Name reported to callers and compared against kind filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Struct => "struct",
            ItemKind::Trait => "trait",
            ItemKind::Function => "function",
            ItemKind::Enum => "enum",
            ItemKind::TypeAlias => "type",
            ItemKind::Constant => "constant",
            ItemKind::Static => "static",
            ItemKind::Macro => "macro",
            ItemKind::Module => "module",
            ItemKind::Unrecognized => "unrecognized",
        }
    }

    /// File name prefix rustdoc uses for pages of this kind.
    pub fn page_prefix(&self) -> &'static str {
        match self {
            ItemKind::Function => "fn",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `::`-delimited item path. The last segment is the item's own name; the
/// others form its enclosing module path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPath {
    segments: Vec<String>,
}

impl ItemPath {
    /// Splits `raw` on `::`, dropping empty segments. Returns `None` when no
    /// segment is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let segments: Vec<String> = raw
            .split(PATH_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn name(&self) -> &str {
        // parse() guarantees at least one segment
        &self.segments[self.segments.len() - 1]
    }

    pub fn module_segments(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(PATH_SEPARATOR))
    }
}

/// The logical document a request is after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocTarget<'a> {
    /// The crate's landing page.
    Overview,
    /// A single item's page.
    Item { kind: ItemKind, path: &'a ItemPath },
    /// The all-items index page.
    AllItems,
}

/// Candidate paths relative to the docs host root, in priority order.
pub fn candidate_paths(crate_name: &str, version: &str, target: &DocTarget<'_>) -> Vec<String> {
    let root = format!("{crate_name}/{version}");

    match target {
        DocTarget::Overview => vec![
            format!("{root}/{crate_name}/index.html"),
            format!("{root}/{crate_name}/"),
            format!("{root}/"),
        ],
        DocTarget::Item { kind, path } => vec![format!("{root}/{}", item_page(*kind, path))],
        DocTarget::AllItems => vec![
            format!("{root}/{crate_name}/all.html"),
            format!("{root}/{crate_name}/"),
        ],
    }
}

/// Page path of an item relative to the version root.
pub fn item_page(kind: ItemKind, path: &ItemPath) -> String {
    if kind == ItemKind::Module {
        return format!("{}/index.html", path.segments().join("/"));
    }

    let page = format!("{}.{}.html", kind.page_prefix(), path.name());
    match path.module_segments() {
        [] => page,
        modules => format!("{}/{page}", modules.join("/")),
    }
}

/// Base URL that relative links on a crate's pages resolve against.
pub fn crate_docs_base(docs_base_url: &str, crate_name: &str, version: &str) -> String {
    format!("{docs_base_url}/{crate_name}/{version}/{crate_name}/")
}
