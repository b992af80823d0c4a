//! Rendering the Contents listing of an index document.
//!
//! Output is a 1-based ordered markdown list of wikilinks: nested indexes first,
//! each with a display alias, then sibling documents. Rendering is pure, so the
//! same inputs always produce byte-identical text, which is what lets the
//! reconciler skip writes by comparing strings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::pattern::NamePattern;
use crate::vault::Document;

/// Text emitted when an index has nothing to list.
pub const EMPTY_PLACEHOLDER: &str = "_No files found_";

/// Placeholder replaced by the (stripped) index name in the display format.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Direction of the listing sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// A to Z
    #[default]
    Ascending,
    /// Z to A
    Descending,
}

/// Everything the renderer needs besides the documents themselves.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Sort each group by name. When false, snapshot (path) order is kept.
    pub sort: bool,
    /// Sort direction
    pub order: SortOrder,
    /// Removed once from nested index names before they are shown
    pub strip: NamePattern,
    /// Alias template for nested indexes, with a `{name}` placeholder
    pub display_format: String,
}

/// Compare two names the way a reader expects: case-insensitive first, then
/// case-sensitive to keep the order total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// Display alias for a nested index.
pub fn nested_alias(doc: &Document, strip: &NamePattern, display_format: &str) -> String {
    let stripped = strip.strip(&doc.basename);
    let name = if stripped.is_empty() {
        doc.basename.as_str()
    } else {
        &*stripped
    };
    display_format.replace(NAME_PLACEHOLDER, name)
}

fn sorted<'a>(docs: &'a [Document], options: &RenderOptions) -> Vec<&'a Document> {
    let mut docs: Vec<&Document> = docs.iter().collect();
    if options.sort {
        // sort_by is stable
        docs.sort_by(|a, b| {
            let ord = compare_names(&a.name, &b.name);
            match options.order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }
    docs
}

/// Render the Contents listing.
pub fn render(siblings: &[Document], nested: &[Document], options: &RenderOptions) -> String {
    let mut lines = Vec::with_capacity(siblings.len() + nested.len());

    for doc in sorted(nested, options) {
        let alias = nested_alias(doc, &options.strip, &options.display_format);
        lines.push(format!("[[{}|{}]]", doc.basename, alias));
    }
    for doc in sorted(siblings, options) {
        lines.push(format!("[[{}]]", doc.basename));
    }

    if lines.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    lines
        .iter()
        .enumerate()
        .map(|(i, link)| format!("{}. {}", i + 1, link))
        .collect::<Vec<_>>()
        .join("\n")
}
