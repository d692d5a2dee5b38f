//! Internal-link extraction and classification
//!
//! Walks a parsed document's paragraphs in order and collects every
//! reference that belongs to the collection, resolved to an absolute
//! location identifier. Classification is purely textual: a reference is
//! internal iff it starts with the collection's internal path prefix.
//! Everything else is dropped.

use crate::config::CollectionConfig;
use crate::content::{Document, PageLink, Paragraph};

/// Extracts every internal link of `doc` as an absolute location, in
/// document order
///
/// Duplicates within one document are not collapsed; the frontier receives
/// one push per occurrence and deduplication happens at fetch time against
/// the index.
///
/// Resolution is mode-dependent: live crawls use the absolute form recorded
/// by the content source's parse, while test crawls prefix the raw
/// reference with the collection's fixed base address so the output is
/// reproducible regardless of retrieval mechanism.
pub fn extract_internal_links(
    doc: &Document,
    collection: &CollectionConfig,
    test_mode: bool,
) -> Vec<String> {
    let mut locations = Vec::new();

    for paragraph in &doc.paragraphs {
        for link in &paragraph.links {
            if !link.href.starts_with(&collection.internal_prefix) {
                continue;
            }

            if test_mode {
                locations.push(format!("{}{}", collection.base_address, link.href));
            } else if let Some(abs) = &link.abs_href {
                locations.push(abs.clone());
            } else {
                tracing::debug!("Dropping unresolvable internal link {}", link.href);
            }
        }
    }

    locations
}

/// True iff the link's enclosing ancestry included an italic or emphasis
/// container
///
/// Not consulted by the discovery path; kept as a standalone predicate for
/// future filtering.
pub fn is_emphasized(link: &PageLink) -> bool {
    link.emphasized
}

/// True iff the link's anchor text begins inside an unclosed parenthetical
/// span of its paragraph
///
/// Scans the paragraph's flattened text up to the first occurrence of the
/// link's anchor text and checks that the running count of opening minus
/// closing parentheses is strictly positive there. Purely textual: a
/// paragraph that repeats the anchor text elsewhere is judged by the first
/// occurrence only, and an anchor that never occurs yields false. Not
/// consulted by the discovery path.
pub fn is_parenthesized(paragraph: &Paragraph, link: &PageLink) -> bool {
    let Some(link_index) = paragraph.text.find(&link.anchor) else {
        return false;
    };

    let mut open = 0i32;
    for c in paragraph.text[..link_index].chars() {
        match c {
            '(' => open += 1,
            ')' => open -= 1,
            _ => {}
        }
    }

    open > 0
}
