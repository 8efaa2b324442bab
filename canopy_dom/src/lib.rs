// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy DOM: an arena-backed document tree for UI utilities.
//!
//! Canopy DOM is the host document the other Canopy crates operate on. It
//! stands in for a browser's native DOM: a tree of elements, text, and comments
//! with attributes, inline style, checkable state, scroll boxes, a focused
//! element, and event listeners.
//!
//! - Nodes live in an arena and are addressed by generational [`NodeId`]s.
//!   Stale identifiers never panic; they answer `None`, `false`, or nothing.
//! - Traversal is iterative: [`Document::descendants`] yields document order,
//!   [`Document::ancestors`] walks toward the root.
//! - [`SelectorList`] parses a practical subset of CSS selectors;
//!   [`Document::matches`], [`Document::query_selector`], and
//!   [`Document::query_selector_all`] evaluate them.
//! - [`Document::focus_element`] is the native focus primitive and
//!   [`Document::click`] runs activation behavior (checkbox toggling and the
//!   `click` → `input` → `change` sequence).
//! - [`Quirks`] describes engine differences that feature probes detect, such
//!   as prefixed `transform` support or suppressed `change` events.
//!
//! ## Not a layout engine
//!
//! Layout is out of scope. Hosts write the results they care about (for
//! example client and scroll sizes per axis) into each element's [`ScrollBox`].
//!
//! ## Minimal example
//!
//! ```rust
//! use canopy_dom::{Document, EventKind, SelectorList};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let list = doc.append_element(root, "ul");
//! let item = doc.append_element(list, "li");
//! doc.set_attribute(item, "class", "selected");
//!
//! let selected = SelectorList::parse("ul > li.selected").unwrap();
//! assert_eq!(doc.query_selector(root, &selected), Some(item));
//!
//! doc.add_event_listener(list, EventKind::Click, |doc, ev| {
//!     doc.set_attribute(ev.target, "data-clicked", "");
//! });
//! doc.click(item);
//! assert!(doc.has_attribute(item, "data-clicked"));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`, `thiserror`, and `tracing`.
//! - `libm`: `no_std` floating-point support for `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod element;
mod event;
mod selector;
mod types;

pub use document::{Ancestors, Descendants, Document, NodeKind};
pub use element::{Attribute, ElementData};
pub use event::{DomEvent, Listener};
pub use selector::{MAX_SELECTOR_NESTING, SelectorError, SelectorList};
pub use types::{ElementState, EventKind, ListenerId, NodeId, Overflow, Quirks, ScrollBox};
