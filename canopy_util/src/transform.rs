// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writing `transform` through whichever property name the engine supports.

use alloc::format;

use canopy_dom::{Document, NodeId};
use kurbo::Affine;

use crate::FeatureCache;

/// Set the inline transform of `element` to the CSS value `value`.
///
/// Returns whether the value was stored.
pub fn set_transform(
    cache: &FeatureCache,
    doc: &mut Document,
    element: NodeId,
    value: &str,
) -> bool {
    let name = cache.transform_property(doc).name();
    doc.set_style_property(element, name, value)
}

/// Set the inline transform of `element` to `matrix(a, b, c, d, e, f)`.
///
/// ```rust
/// use canopy_dom::{Document, Quirks};
/// use canopy_util::{FeatureCache, set_transform_matrix, transform};
/// use kurbo::{Affine, Vec2};
///
/// let mut doc = Document::with_quirks(Quirks::WEBKIT_TRANSFORM);
/// let root = doc.root();
/// let card = doc.append_element(root, "div");
/// let cache = FeatureCache::new();
///
/// set_transform_matrix(&cache, &mut doc, card, Affine::translate(Vec2::new(10.0, -4.5)));
/// assert_eq!(doc.style_property(card, "-webkit-transform"), Some("matrix(1, 0, 0, 1, 10, -4.5)"));
/// assert_eq!(transform(&cache, &doc, card), Some("matrix(1, 0, 0, 1, 10, -4.5)"));
/// ```
pub fn set_transform_matrix(
    cache: &FeatureCache,
    doc: &mut Document,
    element: NodeId,
    matrix: Affine,
) -> bool {
    let [a, b, c, d, e, f] = matrix.as_coeffs();
    let value = format!("matrix({a}, {b}, {c}, {d}, {e}, {f})");
    set_transform(cache, doc, element, &value)
}

/// The inline transform of `element`, if set.
pub fn transform<'a>(cache: &FeatureCache, doc: &'a Document, element: NodeId) -> Option<&'a str> {
    doc.style_property(element, cache.transform_property(doc).name())
}

/// Remove the inline transform of `element`. Returns whether one was set.
pub fn clear_transform(cache: &FeatureCache, doc: &mut Document, element: NodeId) -> bool {
    let name = cache.transform_property(doc).name();
    doc.remove_style_property(element, name)
}
