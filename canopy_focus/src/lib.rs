// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Focus: focusable-element discovery and focus navigation.
//!
//! This crate answers two questions over a [`canopy_dom::Document`]:
//! - **Which elements can take keyboard focus?** [`is_focusable`] is the
//!   predicate and [`focusable_elements`] collects matches in document order.
//! - **Where should focus go next?** [`focus_before`] and [`focus_after`] step
//!   through the document without wrapping, [`focus_in`] enters a container at
//!   an index with cyclic wrap (or at its `autofocus` descendant), and
//!   [`navigate`] exposes the general form with an explicit [`WrapMode`] and
//!   scope, which is what a focus trap needs.
//!
//! Every operation recomputes the candidate set from the current document.
//! Nothing is cached between calls, so mutations made in between are always
//! observed.
//!
//! All operations are fail-soft: stale ids, non-elements, empty containers,
//! and references missing from the candidate set are silent no-ops (or
//! `false`/`None`), never panics.
//!
//! ## Minimal example
//!
//! ```rust
//! use canopy_dom::Document;
//! use canopy_focus::{FocusInOptions, focus_after, focus_in};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let form = doc.append_element(root, "form");
//! let name = doc.append_element(form, "input");
//! let submit = doc.append_element(form, "button");
//!
//! // Enter the form at its last control: -1 wraps around.
//! assert!(focus_in(&mut doc, form, FocusInOptions { index: -1, ..Default::default() }));
//! assert_eq!(doc.active_element(), Some(submit));
//!
//! // Stepping past the end does nothing.
//! focus_after(&mut doc, submit);
//! assert_eq!(doc.active_element(), Some(submit));
//!
//! focus_in(&mut doc, form, FocusInOptions::default());
//! assert_eq!(doc.active_element(), Some(name));
//! ```
//!
//! ## Focusability
//!
//! An element is focusable when it is not `disabled`, its `tabindex` is not
//! exactly `"-1"`, and it is one of:
//! - `a` or `area` with `href`,
//! - `input`, `select`, `textarea`, or `button`,
//! - `iframe`,
//! - any element with `tabindex` or `contenteditable`.
//!
//! Order is document order; `tabindex` values do not reorder candidates.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use canopy_dom::{Document, NodeId};
use tracing::{debug, trace};

/// `tabindex` value that removes an element from sequential navigation.
pub const EXCLUDED_TABINDEX: &str = "-1";

/// Attribute marking the element a container should focus first.
pub const AUTOFOCUS_ATTRIBUTE: &str = "autofocus";

/// Direction of sequential focus navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next candidate in document order (for example, Tab).
    Next,
    /// Move to the previous candidate in document order (for example, Shift+Tab).
    Prev,
}

/// Wrap mode configuration for focus traversal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Do not wrap; stepping off either end yields no candidate.
    #[default]
    Never,
    /// Wrap around to the other end.
    Cyclic,
}

/// Options for [`focus_in`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusInOptions {
    /// Position in the container's focusable set. Any integer is valid; it is
    /// reduced modulo the set size, so `-1` is the last candidate.
    pub index: isize,
    /// Skip the `autofocus` lookup and go straight to `index`.
    pub ignore_auto_focus: bool,
}

/// Whether `node` is an element that can take sequential keyboard focus.
pub fn is_focusable(doc: &Document, node: NodeId) -> bool {
    let Some(el) = doc.element(node) else {
        return false;
    };
    if el.has_attribute("disabled") || el.attribute("tabindex") == Some(EXCLUDED_TABINDEX) {
        return false;
    }
    let interactive = match el.tag() {
        "a" | "area" => el.has_attribute("href"),
        "input" | "select" | "textarea" | "button" | "iframe" => true,
        _ => false,
    };
    interactive || el.has_attribute("tabindex") || el.has_attribute("contenteditable")
}

/// The focusable descendants of `scope`, in document order.
///
/// `scope` itself is never included. Empty for stale or childless scopes.
pub fn focusable_elements(doc: &Document, scope: NodeId) -> Vec<NodeId> {
    doc.descendants(scope)
        .filter(|&n| is_focusable(doc, n))
        .collect()
}

/// Focus `target` if it is a live element; otherwise do nothing.
pub fn focus(doc: &mut Document, target: Option<NodeId>) {
    let Some(target) = target else {
        trace!("focus: no target");
        return;
    };
    if doc.element(target).is_none() {
        trace!(?target, "focus: target cannot take focus");
        return;
    }
    doc.focus_element(target);
}

/// Move focus into `container`.
///
/// 1. Unless [`FocusInOptions::ignore_auto_focus`] is set, the first descendant
///    carrying `autofocus` is focused, whatever the index.
/// 2. Index `0` focuses the first focusable descendant.
/// 3. Any other index selects `(index + n) mod n` among the `n` focusable
///    descendants, so it always wraps.
///
/// Returns `false` only when no target exists; focus is then unchanged.
pub fn focus_in(doc: &mut Document, container: NodeId, options: FocusInOptions) -> bool {
    if !options.ignore_auto_focus {
        let marked = doc
            .descendants(container)
            .find(|&n| doc.has_attribute(n, AUTOFOCUS_ATTRIBUTE));
        if let Some(target) = marked {
            debug!(?container, ?target, "focus_in: autofocus target");
            focus(doc, Some(target));
            return true;
        }
    }

    if options.index == 0 {
        let first = doc
            .descendants(container)
            .find(|&n| is_focusable(doc, n));
        return match first {
            Some(target) => {
                focus(doc, Some(target));
                true
            }
            None => {
                trace!(?container, "focus_in: no focusable descendant");
                false
            }
        };
    }

    let candidates = focusable_elements(doc, container);
    match wrap_index(options.index, candidates.len()) {
        Some(i) => {
            focus(doc, Some(candidates[i]));
            true
        }
        None => {
            trace!(?container, "focus_in: no focusable descendant");
            false
        }
    }
}

/// Focus the focusable element preceding `reference` in the document.
///
/// No-op when `reference` is the first candidate or not a candidate at all.
pub fn focus_before(doc: &mut Document, reference: NodeId) {
    let root = doc.root();
    navigate(doc, root, reference, Navigation::Prev, WrapMode::Never);
}

/// Focus the focusable element following `reference` in the document.
///
/// No-op when `reference` is the last candidate or not a candidate at all.
pub fn focus_after(doc: &mut Document, reference: NodeId) {
    let root = doc.root();
    navigate(doc, root, reference, Navigation::Next, WrapMode::Never);
}

/// Move focus one step from `reference` among the focusable descendants of `scope`.
///
/// `reference` is located by identity. Returns the newly focused element, or
/// `None` when `reference` is not a candidate or the step leaves the set under
/// [`WrapMode::Never`].
///
/// ```rust
/// use canopy_dom::Document;
/// use canopy_focus::{Navigation, WrapMode, navigate};
///
/// let mut doc = Document::new();
/// let root = doc.root();
/// let dialog = doc.append_element(root, "dialog");
/// let ok = doc.append_element(dialog, "button");
/// let cancel = doc.append_element(dialog, "button");
///
/// // A focus trap: Tab on the last control cycles back to the first.
/// assert_eq!(navigate(&mut doc, dialog, cancel, Navigation::Next, WrapMode::Cyclic), Some(ok));
/// assert_eq!(doc.active_element(), Some(ok));
/// ```
pub fn navigate(
    doc: &mut Document,
    scope: NodeId,
    reference: NodeId,
    direction: Navigation,
    wrap: WrapMode,
) -> Option<NodeId> {
    let candidates = focusable_elements(doc, scope);
    let Some(pos) = candidates.iter().position(|&n| n == reference) else {
        trace!(?reference, "navigate: reference is not a focus candidate");
        return None;
    };
    let Some(next) = step_index(pos, candidates.len(), direction, wrap) else {
        trace!(?reference, ?direction, "navigate: at the edge, not wrapping");
        return None;
    };
    let target = candidates[next];
    focus(doc, Some(target));
    Some(target)
}

/// Index one step from `pos` in a sequence of `len` candidates.
pub fn step_index(pos: usize, len: usize, direction: Navigation, wrap: WrapMode) -> Option<usize> {
    if pos >= len {
        return None;
    }
    match direction {
        Navigation::Next => {
            if pos + 1 < len {
                Some(pos + 1)
            } else if wrap == WrapMode::Cyclic {
                Some(0)
            } else {
                None
            }
        }
        Navigation::Prev => {
            if pos > 0 {
                Some(pos - 1)
            } else if wrap == WrapMode::Cyclic {
                Some(len - 1)
            } else {
                None
            }
        }
    }
}

/// Reduce any integer `index` into `0..len`; `None` when `len` is zero.
pub fn wrap_index(index: isize, len: usize) -> Option<usize> {
    let len = isize::try_from(len).ok().filter(|&n| n > 0)?;
    usize::try_from(index.rem_euclid(len)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// A body with `[a, b, c]` focusable plus some noise.
    fn page() -> (Document, NodeId, [NodeId; 3]) {
        let mut doc = Document::new();
        let root = doc.root();
        let body = doc.append_element(root, "body");
        let a = doc.append_element(body, "a");
        doc.set_attribute(a, "href", "#top");
        let plain = doc.append_element(body, "div");
        doc.append_text(plain, "hello");
        let b = doc.append_element(plain, "input");
        let c = doc.append_element(body, "div");
        doc.set_attribute(c, "tabindex", "0");
        (doc, body, [a, b, c])
    }

    #[test]
    fn predicate_clauses() {
        let mut doc = Document::new();
        let root = doc.root();
        let mk = |doc: &mut Document, tag: &str, attrs: &[(&str, &str)]| {
            let id = doc.append_element(root, tag);
            for (k, v) in attrs {
                doc.set_attribute(id, k, v);
            }
            id
        };
        let cases = [
            (mk(&mut doc, "a", &[("href", "/")]), true),
            (mk(&mut doc, "a", &[]), false),
            (mk(&mut doc, "area", &[("href", "/")]), true),
            (mk(&mut doc, "select", &[]), true),
            (mk(&mut doc, "textarea", &[("disabled", "")]), false),
            (mk(&mut doc, "button", &[("tabindex", "-1")]), false),
            (mk(&mut doc, "iframe", &[]), true),
            (mk(&mut doc, "span", &[("tabindex", "2")]), true),
            (mk(&mut doc, "div", &[("contenteditable", "true")]), true),
            (mk(&mut doc, "div", &[("contenteditable", ""), ("disabled", "")]), false),
            (mk(&mut doc, "p", &[]), false),
        ];
        for (i, (id, expected)) in cases.into_iter().enumerate() {
            assert_eq!(is_focusable(&doc, id), expected, "case {i}");
        }
        let text = doc.append_text(root, "x");
        assert!(!is_focusable(&doc, text));
    }

    #[test]
    fn focusable_elements_document_order() {
        let (doc, body, [a, b, c]) = page();
        assert_eq!(focusable_elements(&doc, body), vec![a, b, c]);
        assert_eq!(focusable_elements(&doc, doc.root()), vec![a, b, c]);
        assert!(focusable_elements(&doc, a).is_empty());
    }

    #[test]
    fn focus_after_steps_without_wrap() {
        let (mut doc, _, [a, b, c]) = page();
        focus_after(&mut doc, b);
        assert_eq!(doc.active_element(), Some(c));
        focus_after(&mut doc, c);
        assert_eq!(doc.active_element(), Some(c), "no wrap past the end");
        focus_before(&mut doc, b);
        assert_eq!(doc.active_element(), Some(a));
        focus_before(&mut doc, a);
        assert_eq!(doc.active_element(), Some(a), "no wrap past the start");
    }

    #[test]
    fn step_from_non_candidate_is_noop() {
        let (mut doc, body, [a, b, _]) = page();
        doc.focus_element(a);
        focus_after(&mut doc, body);
        assert_eq!(doc.active_element(), Some(a));

        // A candidate that became hidden from tab order mid-session.
        doc.set_attribute(b, "tabindex", "-1");
        focus_before(&mut doc, b);
        assert_eq!(doc.active_element(), Some(a));

        let detached = doc.create_element("button");
        focus_after(&mut doc, detached);
        assert_eq!(doc.active_element(), Some(a));
    }

    #[test]
    fn set_is_recomputed_every_call() {
        let (mut doc, body, [a, b, c]) = page();
        focus_after(&mut doc, a);
        assert_eq!(doc.active_element(), Some(b));
        doc.set_attribute(b, "disabled", "");
        focus_after(&mut doc, a);
        assert_eq!(doc.active_element(), Some(c));
        let d = doc.append_element(body, "button");
        focus_after(&mut doc, c);
        assert_eq!(doc.active_element(), Some(d));
    }

    #[test]
    fn focus_in_autofocus_wins_regardless_of_index() {
        let (mut doc, body, [_, b, _]) = page();
        doc.set_attribute(b, "autofocus", "");
        for index in [-7, 0, 2, 100] {
            doc.blur();
            assert!(focus_in(
                &mut doc,
                body,
                FocusInOptions {
                    index,
                    ignore_auto_focus: false
                }
            ));
            assert_eq!(doc.active_element(), Some(b), "index {index}");
        }
    }

    #[test]
    fn focus_in_autofocus_may_be_non_focusable() {
        let mut doc = Document::new();
        let root = doc.root();
        let panel = doc.append_element(root, "section");
        let heading = doc.append_element(panel, "h2");
        doc.set_attribute(heading, "autofocus", "");
        assert!(focus_in(&mut doc, panel, FocusInOptions::default()));
        assert_eq!(doc.active_element(), Some(heading));
    }

    #[test]
    fn focus_in_ignoring_autofocus_uses_index() {
        let (mut doc, body, [a, b, c]) = page();
        doc.set_attribute(c, "autofocus", "");
        let opts = |index| FocusInOptions {
            index,
            ignore_auto_focus: true,
        };
        assert!(focus_in(&mut doc, body, opts(0)));
        assert_eq!(doc.active_element(), Some(a));
        assert!(focus_in(&mut doc, body, opts(1)));
        assert_eq!(doc.active_element(), Some(b));
    }

    #[test]
    fn focus_in_wraps_any_integer() {
        let (mut doc, body, nodes) = page();
        for index in -10_isize..10 {
            doc.blur();
            assert!(focus_in(
                &mut doc,
                body,
                FocusInOptions {
                    index,
                    ignore_auto_focus: true
                }
            ));
            let expected = nodes[usize::try_from(index.rem_euclid(3)).unwrap()];
            assert_eq!(doc.active_element(), Some(expected), "index {index}");
        }
    }

    #[test]
    fn focus_in_empty_container_fails_without_side_effects() {
        let (mut doc, body, [a, _, _]) = page();
        let empty = doc.append_element(body, "div");
        doc.append_text(empty, "no controls");
        doc.focus_element(a);
        for index in [0, 1, -1] {
            assert!(!focus_in(
                &mut doc,
                empty,
                FocusInOptions {
                    index,
                    ignore_auto_focus: false
                }
            ));
            assert_eq!(doc.active_element(), Some(a));
        }
        let stale = doc.create_element("div");
        doc.remove(stale);
        assert!(!focus_in(&mut doc, stale, FocusInOptions::default()));
    }

    #[test]
    fn safe_focus_ignores_invalid_targets() {
        let (mut doc, body, [a, _, _]) = page();
        doc.focus_element(a);
        focus(&mut doc, None);
        let text = doc.append_text(body, "t");
        focus(&mut doc, Some(text));
        let comment = doc.create_comment("c");
        focus(&mut doc, Some(comment));
        let root = doc.root();
        focus(&mut doc, Some(root));
        assert_eq!(doc.active_element(), Some(a));

        let gone = doc.append_element(body, "button");
        doc.remove(gone);
        focus(&mut doc, Some(gone));
        assert_eq!(doc.active_element(), Some(a));

        focus(&mut doc, Some(body));
        assert_eq!(doc.active_element(), Some(body), "any element may take programmatic focus");
    }

    #[test]
    fn navigate_cyclic_within_scope() {
        let (mut doc, body, [a, b, c]) = page();
        assert_eq!(
            navigate(&mut doc, body, c, Navigation::Next, WrapMode::Cyclic),
            Some(a)
        );
        assert_eq!(
            navigate(&mut doc, body, a, Navigation::Prev, WrapMode::Cyclic),
            Some(c)
        );
        assert_eq!(
            navigate(&mut doc, body, a, Navigation::Prev, WrapMode::Never),
            None
        );
        assert_eq!(doc.active_element(), Some(c));
        let plain = doc.parent_of(b).unwrap();
        // `a` is outside `plain`, so it is not a candidate there.
        assert_eq!(
            navigate(&mut doc, plain, a, Navigation::Next, WrapMode::Cyclic),
            None
        );
    }

    #[test]
    fn index_helpers() {
        assert_eq!(step_index(0, 3, Navigation::Next, WrapMode::Never), Some(1));
        assert_eq!(step_index(2, 3, Navigation::Next, WrapMode::Never), None);
        assert_eq!(step_index(2, 3, Navigation::Next, WrapMode::Cyclic), Some(0));
        assert_eq!(step_index(0, 3, Navigation::Prev, WrapMode::Cyclic), Some(2));
        assert_eq!(step_index(0, 1, Navigation::Next, WrapMode::Cyclic), Some(0));
        assert_eq!(step_index(3, 3, Navigation::Prev, WrapMode::Cyclic), None);
        assert_eq!(wrap_index(-1, 3), Some(2));
        assert_eq!(wrap_index(-4, 3), Some(2));
        assert_eq!(wrap_index(7, 3), Some(1));
        assert_eq!(wrap_index(0, 0), None);
        assert_eq!(wrap_index(isize::MIN, 5), Some(2));
    }
}
