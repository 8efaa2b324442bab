// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Util: small helpers over a Canopy document.
//!
//! - [`closest`] / [`closest_matching`]: nearest inclusive ancestor matching a selector.
//! - [`contains`]: inclusive subtree membership.
//! - [`scroll_parent`]: nearest ancestor that scrolls along an axis.
//! - [`FeatureCache`]: engine probes that run once and are reused.
//! - [`patch_indeterminate_change`]: restore `change` for indeterminate checkbox
//!   clicks on engines that drop it.
//! - [`set_transform`], [`set_transform_matrix`], [`transform`], [`clear_transform`]:
//!   inline transforms through the engine's property name.
//!
//! ## Minimal example
//!
//! ```rust
//! use canopy_dom::Document;
//! use canopy_util::{closest, contains};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let dialog = doc.append_element(root, "dialog");
//! let button = doc.append_element(dialog, "button");
//!
//! assert_eq!(closest(&doc, button, "dialog").unwrap(), Some(dialog));
//! assert!(contains(&doc, dialog, button));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and `tracing`.
//! - `libm`: `no_std` floating-point support for `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod checkbox;
mod closest;
mod contains;
mod probe;
mod scroll;
mod transform;

pub use checkbox::patch_indeterminate_change;
pub use closest::{closest, closest_matching};
pub use contains::contains;
pub use probe::{FeatureCache, TransformProperty};
pub use scroll::{ScrollAxis, ScrollParentOptions, scroll_parent};
pub use transform::{clear_transform, set_transform, set_transform_matrix, transform};
