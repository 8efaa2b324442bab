// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small CSS selector engine.
//!
//! Supported syntax:
//! - type (`div`), universal (`*`), id (`#main`) and class (`.item`) selectors,
//! - attribute selectors: `[attr]`, `[attr=v]`, `[attr~=v]`, `[attr^=v]`,
//!   `[attr$=v]`, `[attr*=v]` (values bare or quoted),
//! - pseudo-classes `:not(list)`, `:disabled`, `:enabled`, `:checked`,
//!   `:indeterminate`, `:focus`,
//! - descendant (whitespace) and child (`>`) combinators,
//! - comma-separated selector lists.
//!
//! Anything else is rejected with a [`SelectorError`].

use alloc::{boxed::Box, string::String, vec::Vec};

use crate::Document;
use crate::element::ElementData;
use crate::types::{ElementState, NodeId};

/// Errors produced by [`SelectorList::parse`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The input was empty or only whitespace.
    #[error("selector is empty")]
    Empty,
    /// A character that cannot start or continue a selector at this position.
    #[error("unexpected {found:?} at offset {offset}")]
    Unexpected {
        /// The offending character.
        found: char,
        /// Byte offset into the input.
        offset: usize,
    },
    /// The input ended in the middle of a selector.
    #[error("unexpected end of selector")]
    UnexpectedEnd,
    /// A syntactically valid pseudo-class this engine does not implement.
    #[error("unsupported pseudo-class `:{0}`")]
    UnsupportedPseudoClass(String),
    /// `:not()` nested deeper than [`MAX_SELECTOR_NESTING`].
    #[error("selector nests `:not()` deeper than {} levels", MAX_SELECTOR_NESTING)]
    TooDeep,
}

/// Deepest `:not()` nesting the parser accepts.
pub const MAX_SELECTOR_NESTING: usize = 32;

/// A parsed, comma-separated selector list.
///
/// ```rust
/// use canopy_dom::{Document, SelectorList};
///
/// let mut doc = Document::new();
/// let root = doc.root();
/// let nav = doc.append_element(root, "nav");
/// let link = doc.append_element(nav, "a");
/// doc.set_attribute(link, "href", "/home");
///
/// let sel = SelectorList::parse("nav > a[href^='/']").unwrap();
/// assert!(sel.matches(&doc, link));
/// assert!(!sel.matches(&doc, nav));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ComplexSelector {
    // Each part carries its relation to the part on its left; the first part's
    // combinator is unused.
    parts: Vec<(Combinator, Compound)>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<Box<str>>,
    id: Option<Box<str>>,
    classes: Vec<Box<str>>,
    attrs: Vec<AttrSelector>,
    pseudos: Vec<PseudoClass>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct AttrSelector {
    name: Box<str>,
    matcher: Option<(AttrOp, String)>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum AttrOp {
    Equals,
    Includes,
    Prefix,
    Suffix,
    Substring,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PseudoClass {
    Not(SelectorList),
    Disabled,
    Enabled,
    Checked,
    Indeterminate,
    Focus,
}

impl SelectorList {
    /// Parse a selector list.
    pub fn parse(src: &str) -> Result<Self, SelectorError> {
        if src.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut parser = Parser {
            src,
            pos: 0,
            depth: 0,
        };
        let list = parser.parse_list()?;
        parser.skip_ws();
        if parser.pos < src.len() {
            return Err(parser.unexpected());
        }
        Ok(list)
    }

    /// Whether `node` is an element matched by any selector in the list.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        doc.element(node).is_some()
            && self
                .selectors
                .iter()
                .any(|s| match_parts(doc, &s.parts, node) == Match::Matched)
    }
}

impl core::str::FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Outcome of matching a selector suffix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Match {
    Matched,
    /// Failed here; an ancestor further up may still match.
    Retry,
    /// Failed here and at every ancestor; callers stop walking.
    Never,
}

/// Right-to-left match of a compound chain against `node` and its ancestors.
///
/// Recursion is bounded by the number of compounds in the selector, never by
/// tree depth. A suffix that finds no match anywhere above a node reports
/// [`Match::Never`], which stops every enclosing descendant walk, so each
/// (compound, ancestor) pair is visited at most a bounded number of times.
fn match_parts(doc: &Document, parts: &[(Combinator, Compound)], node: NodeId) -> Match {
    let Some(((combinator, compound), rest)) = parts.split_last() else {
        return Match::Matched;
    };
    if !compound.matches(doc, node) {
        return Match::Retry;
    }
    if rest.is_empty() {
        return Match::Matched;
    }
    let mut cursor = doc.parent_of(node);
    while let Some(candidate) = cursor {
        match (match_parts(doc, rest, candidate), combinator) {
            (Match::Matched, _) => return Match::Matched,
            (Match::Never, _) => return Match::Never,
            (Match::Retry, Combinator::Child) => return Match::Retry,
            (Match::Retry, Combinator::Descendant) => {}
        }
        cursor = doc.parent_of(candidate);
    }
    Match::Never
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(el) = doc.element(node) else {
            return false;
        };
        if let Some(tag) = &self.tag
            && **tag != *el.tag()
        {
            return false;
        }
        if let Some(id) = &self.id
            && el.id() != Some(&**id)
        {
            return false;
        }
        self.classes.iter().all(|c| el.has_class(c))
            && self.attrs.iter().all(|a| a.matches(el))
            && self.pseudos.iter().all(|p| p.matches(doc, node, el))
    }
}

impl AttrSelector {
    fn matches(&self, el: &ElementData) -> bool {
        let Some(value) = el.attribute(&self.name) else {
            return false;
        };
        let Some((op, expected)) = &self.matcher else {
            return true;
        };
        let expected = expected.as_str();
        match op {
            AttrOp::Equals => value == expected,
            AttrOp::Includes => value.split_ascii_whitespace().any(|w| w == expected),
            // Empty operands never match for the substring family.
            AttrOp::Prefix => !expected.is_empty() && value.starts_with(expected),
            AttrOp::Suffix => !expected.is_empty() && value.ends_with(expected),
            AttrOp::Substring => !expected.is_empty() && value.contains(expected),
        }
    }
}

impl PseudoClass {
    fn matches(&self, doc: &Document, node: NodeId, el: &ElementData) -> bool {
        match self {
            Self::Not(list) => !list.matches(doc, node),
            Self::Disabled => doc.is_disabled(node),
            Self::Enabled => el.is_form_control() && !doc.is_disabled(node),
            Self::Checked => {
                (el.is_checkbox() || el.is_radio()) && el.state().contains(ElementState::CHECKED)
            }
            Self::Indeterminate => {
                el.is_checkbox() && el.state().contains(ElementState::INDETERMINATE)
            }
            Self::Focus => doc.active_element() == Some(node),
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    /// Current `:not()` nesting.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    /// Skip whitespace; returns whether any was skipped.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn unexpected(&self) -> SelectorError {
        match self.src[self.pos..].chars().next() {
            Some(found) => SelectorError::Unexpected {
                found,
                offset: self.pos,
            },
            None => SelectorError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), SelectorError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn ident(&mut self) -> Result<&'a str, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_byte) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.unexpected());
        }
        Ok(&self.src[start..self.pos])
    }

    fn parse_list(&mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.parse_complex()?);
            self.skip_ws();
            if self.peek() == Some(b',') {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut parts = Vec::new();
        parts.push((Combinator::Descendant, self.parse_compound()?));
        loop {
            let had_ws = self.skip_ws();
            match self.peek() {
                None | Some(b',' | b')') => break,
                Some(b'>') => {
                    self.pos += 1;
                    self.skip_ws();
                    parts.push((Combinator::Child, self.parse_compound()?));
                }
                Some(_) if had_ws => {
                    parts.push((Combinator::Descendant, self.parse_compound()?));
                }
                Some(_) => return Err(self.unexpected()),
            }
        }
        Ok(ComplexSelector { parts })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();
        match self.peek() {
            Some(b'*') => self.pos += 1,
            Some(b) if is_ident_byte(b) => {
                compound.tag = Some(self.ident()?.to_ascii_lowercase().into_boxed_str());
            }
            _ => {}
        }
        loop {
            match self.peek() {
                Some(b'#') => {
                    self.pos += 1;
                    compound.id = Some(self.ident()?.into());
                }
                Some(b'.') => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?.into());
                }
                Some(b'[') => {
                    self.pos += 1;
                    compound.attrs.push(self.parse_attr()?);
                }
                Some(b':') => {
                    self.pos += 1;
                    compound.pseudos.push(self.parse_pseudo()?);
                }
                _ => break,
            }
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn parse_attr(&mut self) -> Result<AttrSelector, SelectorError> {
        self.skip_ws();
        let name = self.ident()?.to_ascii_lowercase().into_boxed_str();
        self.skip_ws();
        let op = match self.peek() {
            Some(b']') => {
                self.pos += 1;
                return Ok(AttrSelector {
                    name,
                    matcher: None,
                });
            }
            Some(b'=') => {
                self.pos += 1;
                AttrOp::Equals
            }
            Some(b @ (b'~' | b'^' | b'$' | b'*')) if self.peek_at(1) == Some(b'=') => {
                self.pos += 2;
                match b {
                    b'~' => AttrOp::Includes,
                    b'^' => AttrOp::Prefix,
                    b'$' => AttrOp::Suffix,
                    _ => AttrOp::Substring,
                }
            }
            _ => return Err(self.unexpected()),
        };
        self.skip_ws();
        let value = self.attr_value()?;
        self.skip_ws();
        self.expect(b']')?;
        Ok(AttrSelector {
            name,
            matcher: Some((op, value)),
        })
    }

    fn attr_value(&mut self) -> Result<String, SelectorError> {
        let Some(quote @ (b'"' | b'\'')) = self.peek() else {
            return self.ident().map(String::from);
        };
        self.pos += 1;
        let mut value = String::new();
        let mut chars = self.src[self.pos..].char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    if let Some((_, escaped)) = chars.next() {
                        value.push(escaped);
                    }
                }
                c if c == char::from(quote) => {
                    self.pos += i + 1;
                    return Ok(value);
                }
                c => value.push(c),
            }
        }
        self.pos = self.src.len();
        Err(SelectorError::UnexpectedEnd)
    }

    fn parse_pseudo(&mut self) -> Result<PseudoClass, SelectorError> {
        let name = self.ident()?;
        if name.eq_ignore_ascii_case("not") {
            self.expect(b'(')?;
            if self.depth == MAX_SELECTOR_NESTING {
                return Err(SelectorError::TooDeep);
            }
            self.depth += 1;
            let inner = self.parse_list()?;
            self.depth -= 1;
            self.skip_ws();
            self.expect(b')')?;
            return Ok(PseudoClass::Not(inner));
        }
        [
            ("disabled", PseudoClass::Disabled),
            ("enabled", PseudoClass::Enabled),
            ("checked", PseudoClass::Checked),
            ("indeterminate", PseudoClass::Indeterminate),
            ("focus", PseudoClass::Focus),
        ]
        .into_iter()
        .find_map(|(kw, p)| name.eq_ignore_ascii_case(kw).then_some(p))
        .ok_or_else(|| SelectorError::UnsupportedPseudoClass(name.into()))
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || !b.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn sel(s: &str) -> SelectorList {
        SelectorList::parse(s).unwrap()
    }

    #[test]
    fn parse_errors_are_typed() {
        assert_eq!(SelectorList::parse("  "), Err(SelectorError::Empty));
        assert_eq!(
            SelectorList::parse("a + b"),
            Err(SelectorError::Unexpected {
                found: '+',
                offset: 2
            })
        );
        assert_eq!(SelectorList::parse("a >"), Err(SelectorError::UnexpectedEnd));
        assert_eq!(SelectorList::parse("[href"), Err(SelectorError::UnexpectedEnd));
        assert_eq!(
            SelectorList::parse("a:hover"),
            Err(SelectorError::UnsupportedPseudoClass("hover".into()))
        );
        assert_eq!(
            SelectorList::parse("a, "),
            Err(SelectorError::UnexpectedEnd)
        );
        assert_eq!(
            SelectorList::parse("a)").unwrap_err().to_string(),
            "unexpected ')' at offset 1"
        );
    }

    #[test]
    fn compound_selectors() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.append_element(root, "div");
        doc.set_attribute(div, "id", "main");
        doc.set_attribute(div, "class", "panel open");
        doc.set_attribute(div, "data-role", "dialog modal");

        assert!(sel("div").matches(&doc, div));
        assert!(sel("DIV#main.panel.open").matches(&doc, div));
        assert!(sel("*.open").matches(&doc, div));
        assert!(!sel("div.closed").matches(&doc, div));
        assert!(sel("[data-role~=modal]").matches(&doc, div));
        assert!(sel("[data-role^=\"dia\"]").matches(&doc, div));
        assert!(sel("[data-role$='modal']").matches(&doc, div));
        assert!(sel("[data-role*=log]").matches(&doc, div));
        assert!(!sel("[data-role^='']").matches(&doc, div));
        assert!(!sel("[data-role=dialog]").matches(&doc, div));
        assert!(!sel("div").matches(&doc, root), "document node is not an element");
    }

    #[test]
    fn combinators_backtrack_over_ancestors() {
        let mut doc = Document::new();
        let root = doc.root();
        let outer = doc.append_element(root, "section");
        doc.set_attribute(outer, "class", "a");
        let mid = doc.append_element(outer, "div");
        let inner = doc.append_element(mid, "section");
        let leaf = doc.append_element(inner, "p");

        assert!(sel("section p").matches(&doc, leaf));
        assert!(sel("section > p").matches(&doc, leaf));
        // `.a > div` must be found through `inner`'s ancestor chain.
        assert!(sel(".a > div section > p").matches(&doc, leaf));
        assert!(!sel(".a > p").matches(&doc, leaf));
        assert!(sel("div, p").matches(&doc, leaf));
    }

    #[test]
    fn child_segment_retries_higher_ancestors() {
        // `<ul><li><div><li><span>`: the nearest `li` is not a child of `ul`,
        // the farther one is.
        let mut doc = Document::new();
        let root = doc.root();
        let ul = doc.append_element(root, "ul");
        let li_outer = doc.append_element(ul, "li");
        let div = doc.append_element(li_outer, "div");
        let li_inner = doc.append_element(div, "li");
        let span = doc.append_element(li_inner, "span");

        assert!(sel("ul > li span").matches(&doc, span));
        assert!(sel("ul > li div > li > span").matches(&doc, span));
        assert!(!sel("ul > li > li span").matches(&doc, span));
        assert!(!sel("div > li div span").matches(&doc, span));
    }

    #[test]
    fn failing_descendant_chain_on_deep_tree() {
        let mut doc = Document::new();
        let mut cursor = doc.root();
        for _ in 0..200 {
            cursor = doc.append_element(cursor, "div");
        }
        let leaf = doc.append_element(cursor, "p");

        let mut src = String::from(".missing");
        for _ in 0..40 {
            src.push_str(" div");
        }
        src.push_str(" p");
        // Backtracking over every ancestor combination would not finish.
        assert!(!sel(&src).matches(&doc, leaf));

        let src = src.replacen(".missing", "div", 1);
        assert!(sel(&src).matches(&doc, leaf));
        assert_eq!(
            doc.query_selector(doc.root(), &sel(".missing div div div")),
            None
        );
    }

    #[test]
    fn not_nesting_is_limited() {
        let nested = |depth: usize| {
            let mut src = String::new();
            for _ in 0..depth {
                src.push_str(":not(");
            }
            src.push('a');
            for _ in 0..depth {
                src.push(')');
            }
            src
        };
        assert!(SelectorList::parse(&nested(MAX_SELECTOR_NESTING)).is_ok());
        assert_eq!(
            SelectorList::parse(&nested(MAX_SELECTOR_NESTING + 1)),
            Err(SelectorError::TooDeep)
        );
        assert_eq!(
            SelectorList::parse(&nested(200_000)),
            Err(SelectorError::TooDeep)
        );

        let mut doc = Document::new();
        let root = doc.root();
        let b = doc.append_element(root, "b");
        // An even number of negations matches `a` only.
        assert!(!sel(&nested(MAX_SELECTOR_NESTING)).matches(&doc, b));
        assert!(sel(&nested(MAX_SELECTOR_NESTING - 1)).matches(&doc, b));
    }

    #[test]
    fn pseudo_classes() {
        let mut doc = Document::new();
        let root = doc.root();
        let input = doc.append_element(root, "input");
        doc.set_attribute(input, "type", "checkbox");
        let button = doc.append_element(root, "button");
        doc.set_attribute(button, "disabled", "");

        assert!(sel("input:enabled").matches(&doc, input));
        assert!(sel("button:disabled").matches(&doc, button));
        assert!(sel("button:not(:enabled)").matches(&doc, button));
        assert!(!sel("input:checked").matches(&doc, input));

        doc.set_checked(input, true);
        doc.set_indeterminate(input, true);
        assert!(sel("input:checked:indeterminate").matches(&doc, input));

        assert!(!sel(":focus").matches(&doc, input));
        doc.focus_element(input);
        assert!(sel("input:focus").matches(&doc, input));
        assert!(sel(":not(button, a)").matches(&doc, input));
    }

    #[test]
    fn quoted_values_unescape() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_element(root, "a");
        doc.set_attribute(a, "title", "say \"hi\"");
        assert!(sel(r#"a[title="say \"hi\""]"#).matches(&doc, a));
        assert!(sel("a[ title = 'say \"hi\"' ]").matches(&doc, a));
    }
}
