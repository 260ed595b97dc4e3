//! Turns the links of an all-items page into typed, filtered, deduplicated records.

use itertools::Itertools;
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

use crate::candidates::ItemKind;

/// Links considered while scanning an index page.
const ITEM_LINKS: &str = "#main-content a[href]";

/// href markers checked in order; the first hit decides the kind.
pub const KIND_MARKERS: [(&str, ItemKind); 8] = [
    ("struct.", ItemKind::Struct),
    ("trait.", ItemKind::Trait),
    ("fn.", ItemKind::Function),
    ("enum.", ItemKind::Enum),
    ("type.", ItemKind::TypeAlias),
    ("const.", ItemKind::Constant),
    ("static.", ItemKind::Static),
    ("macro.", ItemKind::Macro),
];

/// One entry found on an index page. Identity is `(name, kind)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRecord {
    pub name: String,
    pub kind: ItemKind,
    pub link: String,
}

/// Infers an item's kind from the shape of its URL.
pub fn classify_href(href: &str) -> ItemKind {
    KIND_MARKERS
        .iter()
        .find(|(marker, _)| href.contains(marker))
        .map(|(_, kind)| *kind)
        .unwrap_or(ItemKind::Unrecognized)
}

/// Optional query and kind filter. Blank strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    query: Option<String>,
    kind: Option<String>,
}

impl ItemFilter {
    pub fn new(query: Option<&str>, kind: Option<&str>) -> Self {
        let normalize = |s: Option<&str>| {
            s.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            query: normalize(query),
            kind: normalize(kind),
        }
    }

    /// Whether an item with this display name and kind is kept.
    pub fn matches(&self, name: &str, kind: ItemKind) -> bool {
        if kind == ItemKind::Unrecognized {
            return false;
        }

        let lowered = name.to_lowercase();

        let query_ok = self
            .query
            .as_ref()
            .is_none_or(|q| lowered.contains(&q.to_lowercase()));

        let kind_ok = self.kind.as_ref().is_none_or(|filter| {
            filter == kind.as_str() || lowered.contains(&filter.to_lowercase())
        });

        query_ok && kind_ok
    }
}

/// Resolves `href` against `base` unless it is already absolute.
pub fn absolutize(base: &Url, href: &str) -> Option<String> {
    if Url::parse(href).is_ok() {
        return Some(href.to_string());
    }
    base.join(href).ok().map(String::from)
}

/// Scans every link under the primary container, keeping matches in page
/// order and dropping later duplicates of the same `(name, kind)`.
pub fn scan_items(document: &Html, base: &Url, filter: &ItemFilter) -> Vec<ItemRecord> {
    let Ok(selector) = Selector::parse(ITEM_LINKS) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|link| {
            let name = link.text().collect::<String>().trim().to_string();
            let href = link.value().attr("href")?.trim();
            if name.is_empty() || href.is_empty() {
                return None;
            }

            let kind = classify_href(href);
            if !filter.matches(&name, kind) {
                return None;
            }

            let link = absolutize(base, href)?;
            Some(ItemRecord { name, kind, link })
        })
        .unique_by(|record| (record.name.clone(), record.kind))
        .collect()
}
