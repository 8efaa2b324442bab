// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Restoring `change` for indeterminate checkbox clicks.

use canopy_dom::{Document, EventKind, NodeId};
use tracing::{debug, trace};

use crate::FeatureCache;

/// Make clicks on an indeterminate `checkbox` dispatch `change`.
///
/// Some engines toggle an indeterminate checkbox on click without firing
/// `change`. On those engines this installs a `click` listener on `checkbox`
/// that dispatches the missing `change`. Returns whether a listener was
/// installed; `false` when the engine already fires `change` or `checkbox`
/// is not an `input[type=checkbox]`.
///
/// ```rust
/// use canopy_dom::{Document, EventKind, Quirks};
/// use canopy_util::{FeatureCache, patch_indeterminate_change};
///
/// let mut doc = Document::with_quirks(Quirks::INDETERMINATE_CLICK_SUPPRESSES_CHANGE);
/// let root = doc.root();
/// let check = doc.append_element(root, "input");
/// doc.set_attribute(check, "type", "checkbox");
/// doc.set_indeterminate(check, true);
///
/// let cache = FeatureCache::new();
/// assert!(patch_indeterminate_change(&cache, &mut doc, check));
///
/// doc.add_event_listener(check, EventKind::Change, |doc, ev| {
///     doc.set_attribute(ev.target, "data-changed", "");
/// });
/// doc.click(check);
/// assert!(doc.has_attribute(check, "data-changed"));
/// ```
pub fn patch_indeterminate_change(
    cache: &FeatureCache,
    doc: &mut Document,
    checkbox: NodeId,
) -> bool {
    if !doc.element(checkbox).is_some_and(|el| el.is_checkbox()) {
        trace!(?checkbox, "patch_indeterminate_change: not a checkbox");
        return false;
    }
    if cache.indeterminate_fires_change(doc) {
        return false;
    }
    let installed = doc
        .add_event_listener(checkbox, EventKind::Click, |doc, ev| {
            if ev.target == ev.current_target && ev.was_indeterminate() {
                trace!(target = ?ev.target, "dispatching change after indeterminate click");
                doc.dispatch_event(ev.target, EventKind::Change);
            }
        })
        .is_some();
    debug!(?checkbox, installed, "indeterminate change patch");
    installed
}
