//! HTML fragment to Markdown.
//!
//! `html2md` always emits fenced code blocks for `<pre>`, which is the form
//! agents handle best. The conversion is pure and total: any fragment,
//! including the empty one, maps to a string.

/// Converts an extracted HTML fragment into Markdown.
pub fn to_markdown(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    html2md::parse_html(html).trim().to_string()
}
