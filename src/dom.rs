//! Thin DOM helpers over `dom_query`.
//!
//! Call sites work with `Document`/`Selection`/`NodeRef` directly; this module
//! only adds the small operations the extractors share: attribute lookup,
//! class-token checks, and marker-aware text recovery from link fragments.

pub use dom_query::{Document, NodeRef, Selection};
pub use tendril::StrTendril;

use crate::text;

/// Get an attribute value as a zero-copy tendril.
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> Option<StrTendril> {
    sel.attr(name)
}

/// Get a non-empty, trimmed attribute value.
#[must_use]
pub fn attr_non_empty(sel: &Selection, name: &str) -> Option<String> {
    attr(sel, name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Check whether the element's class attribute contains a token.
#[must_use]
pub fn has_class(sel: &Selection, class: &str) -> bool {
    attr(sel, "class")
        .is_some_and(|classes| classes.split_whitespace().any(|token| token == class))
}

/// Parse an HTML fragment into its own document.
///
/// The fragment is wrapped in a full tree by the parser; query against the
/// returned document as usual.
#[must_use]
pub fn fragment(html: &str) -> Document {
    Document::from(html)
}

/// Element text with all `<i>` marker elements removed entirely.
///
/// Works on a cloned fragment so the source document is never mutated.
#[must_use]
pub fn text_without_markers(sel: &Selection) -> String {
    let frag = fragment(&sel.html());
    frag.select("i").remove();
    text::clean_text(&frag.select("body").text())
}

/// The text node immediately following the first inline `<i>` marker inside a
/// fragment, if any.
///
/// Episode links carry an icon element before the visible title; the title is
/// the raw text between that marker and the next tag.
#[must_use]
pub fn tail_after_marker(inner_html: &str) -> Option<String> {
    let (_, tail) = inner_html.split_once("</i>")?;
    let text_node = tail.split('<').next().unwrap_or("");
    Some(text::clean_text(&text::unescape_entities(text_node)))
}
