//! Hyperlink enumeration and same-target lookup.

use std::collections::HashSet;

use linkline_dom::{Document, NodeId};

use crate::overlay::Overlay;

/// The set of links that received a hover-entry handler.
///
/// Handlers are attached to the links present when [`LinkRegistry::attach_hover_handlers`]
/// runs; links inserted later are only covered after it runs again.
#[derive(Debug, Default)]
pub struct LinkRegistry {
    attached: HashSet<NodeId>,
}

impl LinkRegistry {
    /// A registry with no handlers attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the hover-entry handler to every hyperlink in the document.
    pub fn attach_hover_handlers(&mut self, doc: &Document, overlay: &Overlay) {
        self.attached.extend(hyperlinks(doc, overlay));
    }

    /// Whether `node` has a hover-entry handler.
    #[must_use]
    pub fn handles(&self, node: NodeId) -> bool {
        self.attached.contains(&node)
    }

    /// Number of links with a handler.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    /// Whether no link has a handler.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}

/// Every hyperlink in the document in tree order, visited or not. The
/// overlay's own hit-region link is never one of them.
#[must_use]
pub fn hyperlinks(doc: &Document, overlay: &Overlay) -> Vec<NodeId> {
    let tree = doc.tree();
    tree.descendants(tree.root())
        .filter(|&id| tree.as_element(id).is_some_and(|e| e.is_hyperlink()))
        .filter(|&id| !overlay.contains(doc, id))
        .collect()
}

/// Live lookup of the links whose `href` equals `href` exactly, `hovered`
/// excluded. An empty target matches nothing.
#[must_use]
pub fn same_target_links(
    doc: &Document,
    overlay: &Overlay,
    hovered: NodeId,
    href: &str,
) -> Vec<NodeId> {
    if href.is_empty() {
        return Vec::new();
    }
    let tree = doc.tree();
    hyperlinks(doc, overlay)
        .into_iter()
        .filter(|&id| id != hovered)
        .filter(|&id| tree.as_element(id).and_then(|e| e.href()) == Some(href))
        .collect()
}
