// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclusive ancestor lookup by selector.

use canopy_dom::{Document, NodeId, SelectorError, SelectorList};
use tracing::trace;

/// The nearest inclusive ancestor of `element` matched by `selector`.
///
/// The walk starts at `element` itself. Text, comment, and stale nodes yield
/// `Ok(None)`; a selector that does not parse yields the parse error.
///
/// ```rust
/// use canopy_dom::Document;
/// use canopy_util::closest;
///
/// let mut doc = Document::new();
/// let root = doc.root();
/// let menu = doc.append_element(root, "ul");
/// doc.set_attribute(menu, "class", "menu");
/// let item = doc.append_element(menu, "li");
///
/// assert_eq!(closest(&doc, item, ".menu").unwrap(), Some(menu));
/// assert_eq!(closest(&doc, item, "li").unwrap(), Some(item));
/// assert!(closest(&doc, item, "li >").is_err());
/// ```
pub fn closest(
    doc: &Document,
    element: NodeId,
    selector: &str,
) -> Result<Option<NodeId>, SelectorError> {
    let selector = SelectorList::parse(selector)?;
    Ok(closest_matching(doc, element, &selector))
}

/// [`closest`] with a pre-parsed selector.
pub fn closest_matching(
    doc: &Document,
    element: NodeId,
    selector: &SelectorList,
) -> Option<NodeId> {
    if doc.element(element).is_none() {
        trace!(?element, "closest: start is not an element");
        return None;
    }
    core::iter::once(element)
        .chain(doc.ancestors(element))
        .find(|&n| doc.matches(n, selector))
}
