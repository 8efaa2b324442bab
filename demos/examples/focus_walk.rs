// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus navigation and DOM helpers over a small settings page.
//!
//! This example shows how to combine:
//! - `canopy_dom` to build a page and observe focus events,
//! - `canopy_focus` to enter containers and step through controls,
//! - `canopy_util` for selector lookups, scroll parents, and engine probes.
//!
//! Run:
//! - `cargo run -p canopy_demos --example focus_walk`

use canopy_dom::{Document, EventKind, NodeId, Overflow, Quirks, ScrollBox};
use canopy_focus::{
    FocusInOptions, Navigation, WrapMode, focus_after, focus_before, focus_in, focusable_elements,
    navigate,
};
use canopy_util::{
    FeatureCache, ScrollParentOptions, closest, patch_indeterminate_change, scroll_parent,
    set_transform_matrix, transform,
};
use kurbo::{Affine, Size, Vec2};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Human-readable label for a node: `tag#id`, or just the tag.
fn label(doc: &Document, id: Option<NodeId>) -> String {
    let Some(id) = id else {
        return "(none)".to_string();
    };
    match (doc.tag_name(id), doc.attribute(id, "id")) {
        (Some(tag), Some(name)) => format!("{tag}#{name}"),
        (Some(tag), None) => tag.to_string(),
        _ => format!("{id:?}"),
    }
}

fn element(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let id = doc.append_element(parent, tag);
    for (name, value) in attrs {
        doc.set_attribute(id, name, value);
    }
    id
}

fn main() {
    // RUST_LOG=debug shows focus moves and probe results.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();

    // An engine that only understands -webkit-transform and drops `change`
    // for indeterminate checkbox clicks.
    let mut doc = Document::with_quirks(
        Quirks::WEBKIT_TRANSFORM | Quirks::INDETERMINATE_CLICK_SUPPRESSES_CHANGE,
    );
    let root = doc.root();
    let html = element(&mut doc, root, "html", &[]);
    let body = element(&mut doc, html, "body", &[]);

    let nav = element(&mut doc, body, "nav", &[]);
    element(&mut doc, nav, "a", &[("id", "home"), ("href", "/")]);
    element(&mut doc, nav, "a", &[("id", "anchor")]);

    let panel = element(&mut doc, body, "section", &[("id", "settings"), ("class", "panel")]);
    doc.set_scroll_box(
        panel,
        ScrollBox::new(Overflow::Auto, Size::new(320.0, 200.0), Size::new(320.0, 640.0)),
    );
    let form = element(&mut doc, panel, "form", &[]);
    let name = element(&mut doc, form, "input", &[("id", "name"), ("type", "text")]);
    let all = element(&mut doc, form, "input", &[("id", "all"), ("type", "checkbox")]);
    element(&mut doc, form, "input", &[("id", "hidden"), ("type", "text"), ("tabindex", "-1")]);
    element(&mut doc, form, "button", &[("id", "apply"), ("disabled", "")]);
    let save = element(&mut doc, form, "button", &[("id", "save")]);

    for kind in [EventKind::Focus, EventKind::Blur] {
        for &id in &[name, all, save] {
            doc.add_event_listener(id, kind, move |doc, ev| {
                println!("  {:?} on {}", ev.kind, label(doc, Some(ev.target)));
            });
        }
    }

    let candidates: Vec<_> = focusable_elements(&doc, root)
        .into_iter()
        .map(|id| label(&doc, Some(id)))
        .collect();
    println!("focusable, in document order: {candidates:?}");

    println!("focus_in(form, index = -1):");
    focus_in(&mut doc, form, FocusInOptions { index: -1, ..Default::default() });
    println!("  active = {}", label(&doc, doc.active_element()));

    println!("focus_before(save):");
    focus_before(&mut doc, save);
    println!("  active = {}", label(&doc, doc.active_element()));

    println!("focus_after(save) at the end of the page:");
    focus_after(&mut doc, save);
    println!("  active = {}", label(&doc, doc.active_element()));

    println!("Tab inside a focus trap on the form:");
    navigate(&mut doc, form, save, Navigation::Next, WrapMode::Cyclic);
    println!("  active = {}", label(&doc, doc.active_element()));

    doc.set_attribute(all, "autofocus", "");
    println!("focus_in(form) with an autofocus marker:");
    focus_in(&mut doc, form, FocusInOptions { index: 3, ..Default::default() });
    println!("  active = {}", label(&doc, doc.active_element()));

    match closest(&doc, save, ".panel") {
        Ok(found) => println!("closest(.panel) from save = {}", label(&doc, found)),
        Err(err) => println!("closest failed: {err}"),
    }
    let scroller = scroll_parent(&doc, save, ScrollParentOptions::default());
    println!("scroll parent of save = {}", label(&doc, scroller));

    let cache = FeatureCache::new();
    set_transform_matrix(&cache, &mut doc, panel, Affine::translate(Vec2::new(0.0, -120.0)));
    println!(
        "{} = {:?}",
        cache.transform_property(&doc).name(),
        transform(&cache, &doc, panel)
    );

    doc.set_indeterminate(all, true);
    doc.add_event_listener(all, EventKind::Change, |doc, ev| {
        println!(
            "  change on {} (checked = {:?})",
            label(doc, Some(ev.target)),
            doc.state(ev.target)
        );
    });
    let patched = patch_indeterminate_change(&cache, &mut doc, all);
    println!("clicking the indeterminate checkbox (patched = {patched}):");
    doc.click(all);
}
