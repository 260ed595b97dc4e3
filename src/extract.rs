//! Isolates the documentation fragment of a rustdoc page.
//!
//! Extraction is an ordered list of named strategies. Each one looks for a
//! single structural shape and returns its HTML, or `None` when the shape is
//! absent or empty. The one exception is the item-mode primary container,
//! which is kept even when blank. The first strategy that produces something
//! wins. An empty result is a valid outcome and means "page fetched, nothing
//! to show".

use scraper::{ElementRef, Html, Selector};

/// Container holding the page's substantive documentation.
const PRIMARY_CONTAINER: &str = "#main-content";
/// Description block inside the primary container.
const PRIMARY_DESCRIPTION: &str = "#main-content .docblock";
/// Description block on pages predating `#main-content`.
const LEGACY_DESCRIPTION: &str = ".docblock";
/// Item declaration on pages predating `#main-content`.
const LEGACY_DECLARATION: &str = ".item-decl";
/// Older still: the declaration was a bare highlighted `pre`.
const LEGACY_ALT_DECLARATION: &str = "pre.rust";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Crate landing page: only the description is wanted.
    Overview,
    /// Item page: declaration, description and member docs.
    Item,
}

pub struct Strategy {
    pub name: &'static str,
    pub run: fn(&Html) -> Option<String>,
}

const OVERVIEW_STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "primary-description",
        run: primary_description,
    },
    Strategy {
        name: "primary-container",
        run: primary_container,
    },
    Strategy {
        name: "legacy-description",
        run: legacy_description,
    },
    Strategy {
        name: "legacy-declaration",
        run: legacy_declaration,
    },
];

const ITEM_STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "primary-container",
        run: primary_container_whole,
    },
    Strategy {
        name: "legacy-declaration-and-description",
        run: legacy_item,
    },
];

pub fn strategies(mode: ExtractMode) -> &'static [Strategy] {
    match mode {
        ExtractMode::Overview => OVERVIEW_STRATEGIES,
        ExtractMode::Item => ITEM_STRATEGIES,
    }
}

/// Returns the HTML fragment for `mode`, or an empty string when no strategy matched.
pub fn extract(document: &Html, mode: ExtractMode) -> String {
    for strategy in strategies(mode) {
        if let Some(html) = (strategy.run)(document) {
            tracing::trace!(strategy = strategy.name, "Extraction strategy matched");
            return html;
        }
    }
    String::new()
}

/// Parses `html` and extracts the fragment for `mode`.
pub fn extract_from_str(html: &str, mode: ExtractMode) -> String {
    extract(&Html::parse_document(html), mode)
}

fn primary_description(doc: &Html) -> Option<String> {
    inner_html(doc, PRIMARY_DESCRIPTION)
}

fn primary_container(doc: &Html) -> Option<String> {
    inner_html(doc, PRIMARY_CONTAINER)
}

/// Item pages keep the container once it exists, blank or not; the legacy
/// shapes only apply to pages without one.
fn primary_container_whole(doc: &Html) -> Option<String> {
    first(doc, PRIMARY_CONTAINER).map(|el| el.inner_html())
}

fn legacy_description(doc: &Html) -> Option<String> {
    inner_html(doc, LEGACY_DESCRIPTION)
}

fn legacy_declaration(doc: &Html) -> Option<String> {
    outer_html(doc, LEGACY_DECLARATION)
}

/// Declaration followed by description. A bare `pre.rust` stands in for a
/// missing description only when there is no `.item-decl`, since on newer
/// legacy pages it is the declaration itself.
fn legacy_item(doc: &Html) -> Option<String> {
    let declaration = outer_html(doc, LEGACY_DECLARATION);
    let description = outer_html(doc, LEGACY_DESCRIPTION).or_else(|| {
        declaration
            .is_none()
            .then(|| outer_html(doc, LEGACY_ALT_DECLARATION))
            .flatten()
    });
    non_empty(declaration.unwrap_or_default() + &description.unwrap_or_default())
}

fn first<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    doc.select(&selector).next()
}

fn inner_html(doc: &Html, css: &str) -> Option<String> {
    first(doc, css).and_then(|el| non_empty(el.inner_html()))
}

fn outer_html(doc: &Html, css: &str) -> Option<String> {
    first(doc, css).and_then(|el| non_empty(el.html()))
}

fn non_empty(html: String) -> Option<String> {
    if html.trim().is_empty() { None } else { Some(html) }
}
