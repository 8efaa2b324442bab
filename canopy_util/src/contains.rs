// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclusive subtree membership.

use canopy_dom::{Document, NodeId};

/// Whether `node` is `root` or one of its descendants.
///
/// Both handles must be live; stale ones yield `false`.
pub fn contains(doc: &Document, root: NodeId, node: NodeId) -> bool {
    doc.is_inclusive_ancestor(root, node)
}
