// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element data: tag, attributes, inline style, checkable state, and scroll box.

use alloc::{borrow::ToOwned, boxed::Box, string::String};

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::types::{ElementState, ScrollBox};

/// A single attribute. Names are stored lowercase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name.
    pub name: Box<str>,
    /// Attribute value (empty for boolean attributes).
    pub value: String,
}

/// Element-specific node data.
#[derive(Clone, Debug)]
pub struct ElementData {
    tag: Box<str>,
    // Most elements carry only a handful of attributes.
    attrs: SmallVec<[Attribute; 4]>,
    style: HashMap<String, String>,
    pub(crate) state: ElementState,
    pub(crate) scroll: ScrollBox,
}

impl ElementData {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase().into_boxed_str(),
            attrs: SmallVec::new(),
            style: HashMap::new(),
            state: ElementState::empty(),
            scroll: ScrollBox::default(),
        }
    }

    /// Lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value, if present. `name` is matched ASCII case-insensitively.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Whether the attribute is present, whatever its value.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// All attributes in insertion order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attrs
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Whether the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    /// Checkable state.
    pub fn state(&self) -> ElementState {
        self.state
    }

    /// Scroll box as last set by the host.
    pub fn scroll_box(&self) -> &ScrollBox {
        &self.scroll
    }

    /// Inline style property value.
    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    /// `input` elements whose `type` is `checkbox`.
    pub fn is_checkbox(&self) -> bool {
        &*self.tag == "input"
            && self
                .attribute("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
    }

    /// `input` elements whose `type` is `radio`.
    pub fn is_radio(&self) -> bool {
        &*self.tag == "input"
            && self
                .attribute("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("radio"))
    }

    /// Form controls that honor the `disabled` attribute.
    pub fn is_form_control(&self) -> bool {
        matches!(
            &*self.tag,
            "button" | "input" | "select" | "textarea" | "fieldset" | "optgroup" | "option"
        )
    }

    pub(crate) fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some(attr) = self
            .attrs
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            value.clone_into(&mut attr.value);
            return;
        }
        self.attrs.push(Attribute {
            name: name.to_ascii_lowercase().into_boxed_str(),
            value: value.to_owned(),
        });
    }

    pub(crate) fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|a| !a.name.eq_ignore_ascii_case(name));
        self.attrs.len() != before
    }

    pub(crate) fn set_style_property(&mut self, name: &str, value: &str) {
        self.style.insert(name.to_owned(), value.to_owned());
    }

    pub(crate) fn remove_style_property(&mut self, name: &str) -> Option<String> {
        self.style.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_are_case_insensitive_and_replaced() {
        let mut el = ElementData::new("DIV");
        assert_eq!(el.tag(), "div");
        el.set_attribute("TabIndex", "0");
        el.set_attribute("tabindex", "-1");
        assert_eq!(el.attributes().len(), 1);
        assert_eq!(el.attribute("TABINDEX"), Some("-1"));
        assert!(el.remove_attribute("tabIndex"));
        assert!(!el.has_attribute("tabindex"));
        assert!(!el.remove_attribute("tabindex"));
    }

    #[test]
    fn class_list_matching() {
        let mut el = ElementData::new("span");
        el.set_attribute("class", " menu  menu-item\tactive ");
        assert!(el.has_class("menu-item"));
        assert!(el.has_class("active"));
        assert!(!el.has_class("menu-"));
    }

    #[test]
    fn checkbox_detection() {
        let mut el = ElementData::new("input");
        assert!(!el.is_checkbox());
        el.set_attribute("type", "CheckBox");
        assert!(el.is_checkbox());
        assert!(el.is_form_control());
    }
}
