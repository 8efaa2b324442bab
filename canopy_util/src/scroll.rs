// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest scrollable ancestor.

use canopy_dom::{Document, NodeId, Overflow, ScrollBox};
use tracing::trace;

/// Axis along which an ancestor must be able to scroll.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    /// Block axis (`overflow-y`).
    #[default]
    Vertical,
    /// Inline axis (`overflow-x`).
    Horizontal,
    /// Either axis.
    Either,
}

/// Options for [`scroll_parent`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrollParentOptions {
    /// Axis to test.
    pub axis: ScrollAxis,
    /// Consider the start element itself.
    pub include_self: bool,
}

/// The nearest element ancestor of `element` that scrolls along `options.axis`.
///
/// An element scrolls along an axis when its overflow there is `auto` or
/// `scroll` and its content exceeds its box. The document element also
/// scrolls with `overflow: visible`, since the viewport takes over.
///
/// ```rust
/// use canopy_dom::{Document, Overflow, ScrollBox};
/// use canopy_util::{ScrollParentOptions, scroll_parent};
/// use kurbo::Size;
///
/// let mut doc = Document::new();
/// let root = doc.root();
/// let html = doc.append_element(root, "html");
/// let list = doc.append_element(html, "ul");
/// let item = doc.append_element(list, "li");
/// doc.set_scroll_box(
///     list,
///     ScrollBox::new(Overflow::Auto, Size::new(200.0, 100.0), Size::new(200.0, 900.0)),
/// );
///
/// assert_eq!(scroll_parent(&doc, item, ScrollParentOptions::default()), Some(list));
/// ```
pub fn scroll_parent(
    doc: &Document,
    element: NodeId,
    options: ScrollParentOptions,
) -> Option<NodeId> {
    if doc.element(element).is_none() {
        trace!(?element, "scroll_parent: start is not an element");
        return None;
    }
    let document_element = doc.document_element();
    let mut cursor = if options.include_self {
        Some(element)
    } else {
        doc.parent_of(element)
    };
    while let Some(current) = cursor {
        if let Some(scroll) = doc.scroll_box(current) {
            let is_document_element = document_element == Some(current);
            if scrolls(scroll, options.axis, is_document_element) {
                return Some(current);
            }
        }
        cursor = doc.parent_of(current);
    }
    None
}

fn scrolls(scroll: &ScrollBox, axis: ScrollAxis, is_document_element: bool) -> bool {
    let allows = |overflow: Overflow| {
        overflow.is_user_scrollable() || (is_document_element && overflow == Overflow::Visible)
    };
    let y = allows(scroll.overflow_y) && scroll.overflows_y();
    let x = allows(scroll.overflow_x) && scroll.overflows_x();
    match axis {
        ScrollAxis::Vertical => y,
        ScrollAxis::Horizontal => x,
        ScrollAxis::Either => x || y,
    }
}
