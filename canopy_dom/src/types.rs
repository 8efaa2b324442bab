// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document: node identifiers, element state, engine quirks, and scroll boxes.

use kurbo::Size;

/// Identifier for a node in the document (generational).
///
/// A `NodeId` stays valid until its node is removed. After that every query
/// with it answers `None`/`false`, even if the slot has been reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Checkable state of an element.
    ///
    /// Only meaningful on checkbox and radio inputs, but the document stores
    /// it for any element the way scripts are allowed to set it.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ElementState: u8 {
        /// Checkedness.
        const CHECKED       = 0b0000_0001;
        /// The tri-state "mixed" marker. Cleared by activation.
        const INDETERMINATE = 0b0000_0010;
    }
}

bitflags::bitflags! {
    /// Engine behavior profile for a [`Document`](crate::Document).
    ///
    /// The empty set is a standards-conforming engine. Each flag reproduces a
    /// behavior some engine exhibits and that feature probes have to detect.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Quirks: u16 {
        /// Activating an indeterminate checkbox toggles it but dispatches no
        /// `input` or `change` event.
        const INDETERMINATE_CLICK_SUPPRESSES_CHANGE = 0b0000_0001;
        /// Only `-webkit-transform` is understood.
        const WEBKIT_TRANSFORM = 0b0000_0010;
        /// Only `-moz-transform` is understood.
        const MOZ_TRANSFORM = 0b0000_0100;
        /// Only `-ms-transform` is understood.
        const MS_TRANSFORM = 0b0000_1000;
        /// Only `-o-transform` is understood.
        const O_TRANSFORM = 0b0001_0000;
    }
}

impl Quirks {
    /// All prefixed-transform flags.
    pub const PREFIXED_TRANSFORM: Self = Self::WEBKIT_TRANSFORM
        .union(Self::MOZ_TRANSFORM)
        .union(Self::MS_TRANSFORM)
        .union(Self::O_TRANSFORM);
}

/// The `overflow` value of one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Content may paint outside the box.
    #[default]
    Visible,
    /// Content is clipped; only programmatic scrolling is possible.
    Hidden,
    /// Content is clipped with no scrolling at all.
    Clip,
    /// Always a scroll container.
    Scroll,
    /// A scroll container when content overflows.
    Auto,
}

impl Overflow {
    /// Parse a CSS keyword (ASCII case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        [
            ("visible", Self::Visible),
            ("hidden", Self::Hidden),
            ("clip", Self::Clip),
            ("scroll", Self::Scroll),
            ("auto", Self::Auto),
        ]
        .into_iter()
        .find_map(|(kw, v)| value.eq_ignore_ascii_case(kw).then_some(v))
    }

    /// Whether a user can scroll a box with this overflow.
    pub fn is_user_scrollable(self) -> bool {
        matches!(self, Self::Scroll | Self::Auto)
    }
}

/// Scroll-related layout data of an element.
///
/// The document does not perform layout. Hosts copy these values in from
/// whatever layout system they use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollBox {
    /// Horizontal overflow.
    pub overflow_x: Overflow,
    /// Vertical overflow.
    pub overflow_y: Overflow,
    /// Size of the padding box without scrollbars.
    pub client_size: Size,
    /// Size of the content, including the part that overflows.
    pub scroll_size: Size,
}

impl Default for ScrollBox {
    fn default() -> Self {
        Self {
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            client_size: Size::ZERO,
            scroll_size: Size::ZERO,
        }
    }
}

impl ScrollBox {
    /// A box with the same overflow on both axes.
    pub fn new(overflow: Overflow, client_size: Size, scroll_size: Size) -> Self {
        Self {
            overflow_x: overflow,
            overflow_y: overflow,
            client_size,
            scroll_size,
        }
    }

    /// Content is taller than the box.
    pub fn overflows_y(&self) -> bool {
        self.scroll_size.height > self.client_size.height
    }

    /// Content is wider than the box.
    pub fn overflows_x(&self) -> bool {
        self.scroll_size.width > self.client_size.width
    }
}

/// Kind of event carried by a [`DomEvent`](crate::DomEvent).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Activation.
    Click,
    /// Value changed by the user (fires before `Change`).
    Input,
    /// Committed value change.
    Change,
    /// Element gained focus.
    Focus,
    /// Element lost focus.
    Blur,
}

impl EventKind {
    /// Whether the event propagates from the target to its ancestors.
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::Focus | Self::Blur)
    }
}

/// Handle returned by [`Document::add_event_listener`](crate::Document::add_event_listener).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_parse_is_case_insensitive() {
        assert_eq!(Overflow::parse("AUTO"), Some(Overflow::Auto));
        assert_eq!(Overflow::parse(" scroll "), Some(Overflow::Scroll));
        assert_eq!(Overflow::parse("overlay"), None);
        assert!(Overflow::Auto.is_user_scrollable());
        assert!(!Overflow::Hidden.is_user_scrollable());
    }

    #[test]
    fn scroll_box_overflow_per_axis() {
        let b = ScrollBox::new(
            Overflow::Auto,
            Size::new(100.0, 100.0),
            Size::new(100.0, 300.0),
        );
        assert!(b.overflows_y());
        assert!(!b.overflows_x());
        assert!(!ScrollBox::default().overflows_y());
    }

    #[test]
    fn prefixed_transform_covers_all_vendors() {
        assert!(Quirks::PREFIXED_TRANSFORM.contains(Quirks::WEBKIT_TRANSFORM));
        assert!(Quirks::PREFIXED_TRANSFORM.contains(Quirks::O_TRANSFORM));
        assert!(
            !Quirks::PREFIXED_TRANSFORM.contains(Quirks::INDETERMINATE_CLICK_SUPPRESSES_CHANGE)
        );
    }
}
