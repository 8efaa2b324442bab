// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads and listener handles.

use alloc::rc::Rc;

use crate::Document;
use crate::types::{ElementState, EventKind, NodeId};

/// A listener callback.
///
/// Listeners receive the document mutably so they can react by mutating the
/// tree or dispatching further events. Dispatch clones the listener list of
/// each node before invoking it, so listeners added or removed during
/// dispatch take effect on the next event.
pub type Listener = Rc<dyn Fn(&mut Document, &DomEvent)>;

/// An event as seen by a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomEvent {
    /// What happened.
    pub kind: EventKind,
    /// The node the event was dispatched to.
    pub target: NodeId,
    /// The node whose listener is running (differs from `target` while bubbling).
    pub current_target: NodeId,
    /// For `Click` on checkable inputs: the state before activation toggled it.
    ///
    /// By the time listeners run, activation has already flipped `checked`
    /// and cleared `indeterminate`; this is the only way to see the old state.
    pub pre_activation: Option<ElementState>,
}

impl DomEvent {
    /// A plain event targeted at `target`.
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            pre_activation: None,
        }
    }

    /// Whether the click activated an input that was indeterminate.
    pub fn was_indeterminate(&self) -> bool {
        self.pre_activation
            .is_some_and(|s| s.contains(ElementState::INDETERMINATE))
    }
}
