// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, mutation, traversal, events, and focus.

use alloc::{rc::Rc, string::String, vec::Vec};

use tracing::{debug, trace};

use crate::element::ElementData;
use crate::event::{DomEvent, Listener};
use crate::selector::SelectorList;
use crate::types::{ElementState, EventKind, ListenerId, NodeId, Quirks, ScrollBox};

/// What a node is.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// The document node. There is exactly one, and it is the root.
    Document,
    /// An element.
    Element(ElementData),
    /// A text node.
    Text(String),
    /// A comment.
    Comment(String),
}

/// An arena-backed document tree.
///
/// Nodes are addressed by generational [`NodeId`]s. Removing a node frees its
/// whole subtree; stale identifiers are tolerated everywhere and simply answer
/// `None`, `false`, or an empty result.
///
/// The document plays the role of a browser's native DOM: it owns the tree,
/// the inline style and checkable state of elements, the active (focused)
/// element, and event listeners. It does not perform layout; hosts copy
/// [`ScrollBox`] data in from their layout system.
///
/// ## Example
///
/// ```rust
/// use canopy_dom::Document;
///
/// let mut doc = Document::new();
/// let root = doc.root();
/// let form = doc.append_element(root, "form");
/// let input = doc.append_element(form, "input");
///
/// assert!(doc.focus_element(input));
/// assert_eq!(doc.active_element(), Some(input));
///
/// doc.remove(form);
/// assert!(!doc.is_alive(input));
/// assert_eq!(doc.active_element(), None);
/// ```
pub struct Document {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    active: Option<NodeId>,
    quirks: Quirks,
    next_listener: u32,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("active", &self.active)
            .field("quirks", &self.quirks)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
}

impl Node {
    fn new(generation: u32, kind: NodeKind) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            kind,
            listeners: Vec::new(),
        }
    }
}

impl Document {
    /// Create an empty document for a standards-conforming engine.
    pub fn new() -> Self {
        Self::with_quirks(Quirks::empty())
    }

    /// Create an empty document whose engine exhibits `quirks`.
    pub fn with_quirks(quirks: Quirks) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            active: None,
            quirks,
            next_listener: 0,
        };
        doc.root = doc.alloc(NodeKind::Document);
        doc
    }

    /// The engine profile.
    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The first element child of the document node (`<html>` in a page).
    pub fn document_element(&self) -> Option<NodeId> {
        self.children_of(self.root)
            .iter()
            .copied()
            .find(|&c| self.element(c).is_some())
    }

    // --- construction and mutation ---

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.into()))
    }

    /// Create a detached comment.
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Comment(text.into()))
    }

    /// Create an element and append it to `parent`.
    ///
    /// If `parent` cannot take children the element is still created and
    /// returned, detached.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Create a text node and append it to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.create_text(text);
        self.append_child(parent, id);
        id
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Returns `false` (and changes nothing) when either id is stale, when
    /// `parent` is a text or comment node, when `child` is the document node,
    /// or when `child` is an inclusive ancestor of `parent`.
    ///
    /// Moving the focused element (or an ancestor of it) under a detached
    /// parent drops focus without dispatching `blur`, as [`Document::detach`] does.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.is_alive(parent) || !self.is_alive(child) || child == self.root {
            trace!(?parent, ?child, "append_child: stale or root node");
            return false;
        }
        if !matches!(
            self.node(parent).kind,
            NodeKind::Document | NodeKind::Element(_)
        ) {
            trace!(?parent, "append_child: parent cannot have children");
            return false;
        }
        if self.is_inclusive_ancestor(child, parent) {
            trace!(?parent, ?child, "append_child: would create a cycle");
            return false;
        }
        if let Some(old) = self.node(child).parent {
            self.unlink_parent(child, old);
        }
        self.link_parent(child, parent);
        self.drop_disconnected_focus();
        true
    }

    /// Detach `id` (and its subtree) from its parent. The nodes stay alive.
    ///
    /// If the active element was inside the subtree, the document loses focus
    /// without dispatching `blur`.
    pub fn detach(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.drop_disconnected_focus();
    }

    /// Remove a node and its subtree. The document node cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        self.detach(id);
        let mut stack = alloc::vec![id];
        while let Some(n) = stack.pop() {
            if let Some(node) = self.nodes[n.idx()].take() {
                stack.extend(node.children);
                self.free_list.push(n.idx());
            }
        }
    }

    // --- liveness and structure ---

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation
    /// matches the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Node kind, if live.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node_opt(id).map(|n| &n.kind)
    }

    /// Element data, if `id` is a live element.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.kind(id)? {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Text content, if `id` is a live text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Lowercase tag name of a live element.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(ElementData::tag)
    }

    /// Returns the parent of a node if live, or `None` for detached nodes, the root, or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// The next sibling of a node, if any.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children_of(self.parent_of(id)?);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// The previous sibling of a node, if any.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children_of(self.parent_of(id)?);
        let pos = siblings.iter().position(|&c| c == id)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) || !self.is_alive(node) {
            return false;
        }
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent_of(current);
        }
        false
    }

    /// Whether `id` is attached to the document node.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root, id)
    }

    /// Iterate the ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent_of(id),
        }
    }

    /// Iterate the descendants of `scope` in document (pre-)order, excluding `scope`.
    pub fn descendants(&self, scope: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: alloc::vec![(scope, 0)],
        }
    }

    /// Get the next node in depth-first traversal order.
    ///
    /// Returns `None` if no next node exists or if the current node is stale.
    /// This is a standard tree traversal that does not wrap around.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        self.next_in_order(current)
    }

    /// Get the previous node in reverse depth-first traversal order.
    ///
    /// Returns `None` if no previous node exists or if the current node is stale.
    /// This is a standard tree traversal that does not wrap around.
    pub fn prev_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        match self.prev_sibling(current) {
            Some(prev) => Some(self.last_in_subtree(prev)),
            None => self.parent_of(current),
        }
    }

    // --- attributes, state, style, scroll ---

    /// Attribute value of a live element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attribute(name)
    }

    /// Whether a live element carries the attribute.
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Set (or replace) an attribute. Returns `false` if `id` is not a live element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        match self.element_mut(id) {
            Some(el) => {
                el.set_attribute(name, value);
                true
            }
            None => {
                trace!(?id, name, "set_attribute on a non-element");
                false
            }
        }
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        self.element_mut(id)
            .is_some_and(|el| el.remove_attribute(name))
    }

    /// Whether a live form control is disabled.
    ///
    /// A control is disabled when it carries `disabled`, or when it sits inside
    /// a disabled `fieldset` (other than inside that fieldset's first `legend`).
    pub fn is_disabled(&self, id: NodeId) -> bool {
        let Some(el) = self.element(id) else {
            return false;
        };
        if !el.is_form_control() {
            return false;
        }
        if el.has_attribute("disabled") {
            return true;
        }
        let mut child = id;
        for ancestor in self.ancestors(id) {
            if let Some(a) = self.element(ancestor)
                && a.tag() == "fieldset"
                && a.has_attribute("disabled")
            {
                let first_legend = self
                    .children_of(ancestor)
                    .iter()
                    .copied()
                    .find(|&c| self.tag_name(c) == Some("legend"));
                if first_legend != Some(child) {
                    return true;
                }
            }
            child = ancestor;
        }
        false
    }

    /// Checkable state of a live element.
    pub fn state(&self, id: NodeId) -> Option<ElementState> {
        self.element(id).map(ElementData::state)
    }

    /// Set checkedness. Returns `false` if `id` is not a live element.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> bool {
        self.set_state(id, ElementState::CHECKED, checked)
    }

    /// Set the indeterminate marker. Returns `false` if `id` is not a live element.
    pub fn set_indeterminate(&mut self, id: NodeId, indeterminate: bool) -> bool {
        self.set_state(id, ElementState::INDETERMINATE, indeterminate)
    }

    /// Inline style property of a live element.
    pub fn style_property(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.style_property(name)
    }

    /// Whether the engine understands the style property `name`.
    ///
    /// Only `transform` and its vendor-prefixed forms are profile dependent;
    /// every other property is accepted.
    pub fn supports_style_property(&self, name: &str) -> bool {
        match name {
            "transform" => !self.quirks.intersects(Quirks::PREFIXED_TRANSFORM),
            "-webkit-transform" => self.quirks.contains(Quirks::WEBKIT_TRANSFORM),
            "-moz-transform" => self.quirks.contains(Quirks::MOZ_TRANSFORM),
            "-ms-transform" => self.quirks.contains(Quirks::MS_TRANSFORM),
            "-o-transform" => self.quirks.contains(Quirks::O_TRANSFORM),
            _ => true,
        }
    }

    /// Set an inline style property.
    ///
    /// Like a CSSOM declaration block, properties the engine does not support
    /// are ignored; the return value reports whether the value was stored.
    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        if !self.supports_style_property(name) {
            trace!(name, "set_style_property: unsupported property ignored");
            return false;
        }
        match self.element_mut(id) {
            Some(el) => {
                el.set_style_property(name, value);
                true
            }
            None => false,
        }
    }

    /// Remove an inline style property. Returns whether it was present.
    pub fn remove_style_property(&mut self, id: NodeId, name: &str) -> bool {
        self.element_mut(id)
            .is_some_and(|el| el.remove_style_property(name).is_some())
    }

    /// Scroll box of a live element.
    pub fn scroll_box(&self, id: NodeId) -> Option<&ScrollBox> {
        self.element(id).map(ElementData::scroll_box)
    }

    /// Replace the scroll box of a live element.
    pub fn set_scroll_box(&mut self, id: NodeId, scroll: ScrollBox) -> bool {
        match self.element_mut(id) {
            Some(el) => {
                el.scroll = scroll;
                true
            }
            None => false,
        }
    }

    // --- selectors ---

    /// Whether `id` is an element matched by `selector`.
    pub fn matches(&self, id: NodeId, selector: &SelectorList) -> bool {
        selector.matches(self, id)
    }

    /// First descendant of `scope` (in document order) matched by `selector`.
    pub fn query_selector(&self, scope: NodeId, selector: &SelectorList) -> Option<NodeId> {
        self.descendants(scope).find(|&n| selector.matches(self, n))
    }

    /// All descendants of `scope` matched by `selector`, in document order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&n| selector.matches(self, n))
            .collect()
    }

    // --- focus ---

    /// The focused element, if any.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|&id| self.is_alive(id))
    }

    /// The native focus primitive.
    ///
    /// Focuses a connected element, dispatching `blur` on the previously focused
    /// element and then `focus` on `id`. Focusing the already focused element
    /// dispatches nothing. Returns whether `id` is focused afterwards.
    pub fn focus_element(&mut self, id: NodeId) -> bool {
        if self.element(id).is_none() || !self.is_connected(id) {
            trace!(?id, "focus_element: not a connected element");
            return false;
        }
        if self.active_element() == Some(id) {
            return true;
        }
        let previous = self.active_element();
        self.active = Some(id);
        debug!(?previous, ?id, "focus moved");
        if let Some(prev) = previous {
            self.dispatch(DomEvent::new(EventKind::Blur, prev));
        }
        self.dispatch(DomEvent::new(EventKind::Focus, id));
        self.active_element() == Some(id)
    }

    /// Drop focus, dispatching `blur` on the element that had it.
    pub fn blur(&mut self) {
        if let Some(prev) = self.active_element() {
            self.active = None;
            debug!(?prev, "focus cleared");
            self.dispatch(DomEvent::new(EventKind::Blur, prev));
        }
    }

    // --- events ---

    /// Register a listener for `kind` events reaching `id`.
    ///
    /// Returns `None` if `id` is stale.
    pub fn add_event_listener(
        &mut self,
        id: NodeId,
        kind: EventKind,
        listener: impl Fn(&mut Self, &DomEvent) + 'static,
    ) -> Option<ListenerId> {
        let listener_id = ListenerId(self.next_listener);
        let listener: Listener = Rc::new(listener);
        let node = self.node_opt_mut(id)?;
        node.listeners.push((listener_id, kind, listener));
        self.next_listener = self.next_listener.wrapping_add(1);
        Some(listener_id)
    }

    /// Unregister a listener. Returns whether it was registered on `id`.
    pub fn remove_event_listener(&mut self, id: NodeId, listener: ListenerId) -> bool {
        let Some(node) = self.node_opt_mut(id) else {
            return false;
        };
        let before = node.listeners.len();
        node.listeners.retain(|(l, _, _)| *l != listener);
        node.listeners.len() != before
    }

    /// Dispatch a synthetic event of `kind` at `target`.
    ///
    /// Bubbling kinds run the target's listeners and then each ancestor's.
    /// Returns `false` if `target` is stale.
    pub fn dispatch_event(&mut self, target: NodeId, kind: EventKind) -> bool {
        if !self.is_alive(target) {
            return false;
        }
        self.dispatch(DomEvent::new(kind, target));
        true
    }

    /// Activate an element the way a user click does.
    ///
    /// Disabled controls ignore clicks. For checkboxes, activation clears
    /// `indeterminate` and toggles `checked` before `click` is dispatched, then
    /// `input` and `change` follow, unless the engine has
    /// [`Quirks::INDETERMINATE_CLICK_SUPPRESSES_CHANGE`] and the box was
    /// indeterminate. Unchecked radios become checked, uncheck the other radios
    /// of their group, and fire `input` and `change`.
    ///
    /// Returns `false` if nothing was activated.
    pub fn click(&mut self, id: NodeId) -> bool {
        let Some(el) = self.element(id) else {
            trace!(?id, "click on a non-element");
            return false;
        };
        if self.is_disabled(id) {
            trace!(?id, "click on a disabled control");
            return false;
        }
        let pre = el.state();
        let checkbox = el.is_checkbox();
        let radio = el.is_radio() && !pre.contains(ElementState::CHECKED);
        let radio_group = radio.then(|| el.attribute("name").map(String::from)).flatten();

        if checkbox {
            self.set_state(id, ElementState::INDETERMINATE, false);
            self.set_state(id, ElementState::CHECKED, !pre.contains(ElementState::CHECKED));
        }
        if radio {
            if let Some(group) = radio_group {
                self.uncheck_radio_group(id, &group);
            }
            self.set_state(id, ElementState::CHECKED, true);
        }

        self.dispatch(DomEvent {
            pre_activation: (checkbox || radio).then_some(pre),
            ..DomEvent::new(EventKind::Click, id)
        });

        if (checkbox || radio) && self.is_alive(id) {
            let suppressed = checkbox
                && pre.contains(ElementState::INDETERMINATE)
                && self
                    .quirks
                    .contains(Quirks::INDETERMINATE_CLICK_SUPPRESSES_CHANGE);
            if suppressed {
                trace!(?id, "indeterminate activation: change suppressed by engine");
            } else {
                self.dispatch(DomEvent::new(EventKind::Input, id));
                self.dispatch(DomEvent::new(EventKind::Change, id));
            }
        }
        true
    }

    // --- internals ---

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, kind));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, kind)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Access a live node; panics if `id` is stale. Callers check liveness first.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.node_opt_mut(id)?.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    fn set_state(&mut self, id: NodeId, flag: ElementState, on: bool) -> bool {
        match self.element_mut(id) {
            Some(el) => {
                el.state.set(flag, on);
                true
            }
            None => false,
        }
    }

    fn uncheck_radio_group(&mut self, except: NodeId, group: &str) {
        let Some(scope) = self
            .ancestors(except)
            .find(|&a| self.tag_name(a) == Some("form"))
            .or_else(|| self.is_connected(except).then_some(self.root))
        else {
            return;
        };
        let members: Vec<NodeId> = self
            .descendants(scope)
            .filter(|&n| {
                n != except
                    && self
                        .element(n)
                        .is_some_and(|el| el.is_radio() && el.attribute("name") == Some(group))
            })
            .collect();
        for member in members {
            self.set_state(member, ElementState::CHECKED, false);
        }
    }

    /// Clear focus, without `blur`, once the active element left the document.
    fn drop_disconnected_focus(&mut self) {
        if let Some(active) = self.active
            && !self.is_connected(active)
        {
            trace!(?active, "focused element disconnected");
            self.active = None;
        }
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    /// Next node in pre-order.
    fn next_in_order(&self, current: NodeId) -> Option<NodeId> {
        if let Some(&first_child) = self.children_of(current).first() {
            return Some(first_child);
        }
        let mut node = current;
        loop {
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = self.parent_of(node)?;
        }
    }

    fn last_in_subtree(&self, mut node: NodeId) -> NodeId {
        while let Some(&last) = self.children_of(node).last() {
            node = last;
        }
        node
    }

    fn dispatch(&mut self, event: DomEvent) {
        let mut path = alloc::vec![event.target];
        if event.kind.bubbles() {
            path.extend(self.ancestors(event.target));
        }
        for current in path {
            // Snapshot so listeners may freely mutate the document.
            let listeners: Vec<Listener> = match self.node_opt(current) {
                Some(node) => node
                    .listeners
                    .iter()
                    .filter(|(_, kind, _)| *kind == event.kind)
                    .map(|(_, _, l)| Rc::clone(l))
                    .collect(),
                None => continue,
            };
            let event = DomEvent {
                current_target: current,
                ..event
            };
            for listener in listeners {
                listener(self, &event);
            }
        }
    }
}

/// Iterator over ancestors, see [`Document::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent_of(current);
        Some(current)
    }
}

/// Iterator over descendants in document order, see [`Document::descendants`].
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    /// Open parents with the index of the next child to yield.
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let (parent, next_child) = self.stack.last_mut()?;
            let Some(&child) = self.doc.children_of(*parent).get(*next_child) else {
                self.stack.pop();
                continue;
            };
            *next_child += 1;
            if !self.doc.children_of(child).is_empty() {
                self.stack.push((child, 0));
            }
            return Some(child);
        }
    }
}
