// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Init-once engine feature probes.

use alloc::rc::Rc;
use core::cell::{Cell, OnceCell};

use canopy_dom::{Document, EventKind};
use tracing::debug;

/// Style property name an engine uses for transforms.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransformProperty {
    /// `transform`
    #[default]
    Standard,
    /// `-webkit-transform`
    Webkit,
    /// `-moz-transform`
    Moz,
    /// `-ms-transform`
    Ms,
    /// `-o-transform`
    O,
}

impl TransformProperty {
    /// Candidates in probe order.
    pub const ALL: [Self; 5] = [Self::Standard, Self::Webkit, Self::Moz, Self::Ms, Self::O];

    /// The CSS property name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "transform",
            Self::Webkit => "-webkit-transform",
            Self::Moz => "-moz-transform",
            Self::Ms => "-ms-transform",
            Self::O => "-o-transform",
        }
    }
}

/// Results of engine feature probes, each computed on first use.
///
/// A cache describes one engine. Share it between every document of that
/// engine; pairing it with a document from a different engine returns the
/// results of whichever document ran the probe first.
///
/// ```rust
/// use canopy_dom::{Document, Quirks};
/// use canopy_util::{FeatureCache, TransformProperty};
///
/// let doc = Document::with_quirks(Quirks::WEBKIT_TRANSFORM);
/// let cache = FeatureCache::new();
/// assert_eq!(cache.transform_property(&doc), TransformProperty::Webkit);
/// ```
#[derive(Debug, Default)]
pub struct FeatureCache {
    indeterminate_change: OnceCell<bool>,
    transform: OnceCell<TransformProperty>,
}

impl FeatureCache {
    /// An empty cache; nothing is probed until asked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether clicking an indeterminate checkbox dispatches `change`.
    ///
    /// The probe builds a detached checkbox in `doc`, clicks it, and removes it
    /// again; listeners elsewhere in the document never see it.
    pub fn indeterminate_fires_change(&self, doc: &mut Document) -> bool {
        *self
            .indeterminate_change
            .get_or_init(|| probe_indeterminate_change(doc))
    }

    /// The transform property name `doc`'s engine supports.
    pub fn transform_property(&self, doc: &Document) -> TransformProperty {
        *self.transform.get_or_init(|| probe_transform(doc))
    }

    /// Whether the indeterminate probe has run.
    pub fn has_probed_indeterminate_change(&self) -> bool {
        self.indeterminate_change.get().is_some()
    }

    /// Whether the transform probe has run.
    pub fn has_probed_transform(&self) -> bool {
        self.transform.get().is_some()
    }
}

fn probe_indeterminate_change(doc: &mut Document) -> bool {
    let checkbox = doc.create_element("input");
    doc.set_attribute(checkbox, "type", "checkbox");
    doc.set_indeterminate(checkbox, true);
    let fired = Rc::new(Cell::new(false));
    let seen = Rc::clone(&fired);
    doc.add_event_listener(checkbox, EventKind::Change, move |_, _| seen.set(true));
    doc.click(checkbox);
    doc.remove(checkbox);
    let fired = fired.get();
    debug!(fired, "probe: change on indeterminate checkbox click");
    fired
}

fn probe_transform(doc: &Document) -> TransformProperty {
    let found = TransformProperty::ALL
        .into_iter()
        .find(|p| doc.supports_style_property(p.name()))
        .unwrap_or_default();
    debug!(name = found.name(), "probe: transform property");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_dom::Quirks;

    #[test]
    fn transform_probe_order() {
        let cases = [
            (Quirks::empty(), TransformProperty::Standard),
            (Quirks::WEBKIT_TRANSFORM, TransformProperty::Webkit),
            (Quirks::MOZ_TRANSFORM, TransformProperty::Moz),
            (Quirks::MS_TRANSFORM, TransformProperty::Ms),
            (Quirks::O_TRANSFORM, TransformProperty::O),
            (
                Quirks::MS_TRANSFORM | Quirks::WEBKIT_TRANSFORM,
                TransformProperty::Webkit,
            ),
        ];
        for (quirks, expected) in cases {
            let doc = Document::with_quirks(quirks);
            assert_eq!(
                FeatureCache::new().transform_property(&doc),
                expected,
                "{quirks:?}"
            );
        }
    }

    #[test]
    fn indeterminate_probe_reflects_engine() {
        let mut modern = Document::new();
        assert!(FeatureCache::new().indeterminate_fires_change(&mut modern));
        let mut legacy = Document::with_quirks(Quirks::INDETERMINATE_CLICK_SUPPRESSES_CHANGE);
        assert!(!FeatureCache::new().indeterminate_fires_change(&mut legacy));
    }

    #[test]
    fn probes_run_once() {
        let cache = FeatureCache::new();
        assert!(!cache.has_probed_indeterminate_change());
        assert!(!cache.has_probed_transform());

        let mut legacy = Document::with_quirks(
            Quirks::INDETERMINATE_CLICK_SUPPRESSES_CHANGE | Quirks::MOZ_TRANSFORM,
        );
        assert!(!cache.indeterminate_fires_change(&mut legacy));
        assert_eq!(cache.transform_property(&legacy), TransformProperty::Moz);
        assert!(cache.has_probed_indeterminate_change());
        assert!(cache.has_probed_transform());

        // A second engine does not trigger a re-probe.
        let mut modern = Document::new();
        assert!(!cache.indeterminate_fires_change(&mut modern));
        assert_eq!(cache.transform_property(&modern), TransformProperty::Moz);
        assert_eq!(modern.descendants(modern.root()).count(), 0);
    }

    #[test]
    fn probe_leaves_no_trace() {
        let mut doc = Document::new();
        let root = doc.root();
        let body = doc.append_element(root, "body");
        let seen = Rc::new(Cell::new(0_u32));
        let counter = Rc::clone(&seen);
        doc.add_event_listener(root, EventKind::Change, move |_, _| {
            counter.set(counter.get() + 1);
        });
        FeatureCache::new().indeterminate_fires_change(&mut doc);
        assert_eq!(seen.get(), 0, "detached probe must not bubble into the page");
        assert_eq!(doc.descendants(root).collect::<alloc::vec::Vec<_>>(), [body]);
    }
}
