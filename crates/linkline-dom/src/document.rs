//! Host document model.
//!
//! [CSSOM View Module](https://www.w3.org/TR/cssom-view-1/)
//!
//! Stands in for the browser's layout engine: it answers the queries the
//! overlay makes (bounding boxes, computed `position`, scroll offsets,
//! document extent) with the coordinate-space semantics of a real viewport.
//!
//! Laid-out boxes are recorded in the space they stay fixed in. Content under
//! a `position: fixed` element is laid out against the viewport; everything
//! else is laid out against the document origin and moves with scrolling.

use std::collections::HashMap;

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::{DomTree, NodeId};

/// [§ 6.1 The DOMRect interfaces](https://drafts.fxtf.org/geometry/#DOMRect)
///
/// A bounding box relative to the top-left corner of the viewport, as
/// returned by `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClientRect {
    /// Top edge.
    pub top: f32,
    /// Left edge.
    pub left: f32,
    /// Bottom edge.
    pub bottom: f32,
    /// Right edge.
    pub right: f32,
}

impl ClientRect {
    /// Width of the box.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the box.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Whether the point lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// The same box moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            top: self.top + dy,
            left: self.left + dx,
            bottom: self.bottom + dy,
            right: self.right + dx,
        }
    }
}

/// [§ 5 Extensions to the Window Interface](https://www.w3.org/TR/cssom-view-1/#extensions-to-the-window-interface)
///
/// `scrollX` / `scrollY`: how far the document has been scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScrollOffset {
    /// Horizontal scroll offset.
    pub x: f32,
    /// Vertical scroll offset.
    pub y: f32,
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Size {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// [§ 9.3.1 Choosing a positioning scheme](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
///
/// The computed value of the `position` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// "The box is a normal box, laid out according to the normal flow."
    #[default]
    Static,
    /// Offset relative to its normal-flow position.
    Relative,
    /// Positioned against its containing block.
    Absolute,
    /// "The box is fixed with respect to some reference." Here: the viewport.
    Fixed,
    /// Offset relative to the nearest scrolling ancestor.
    Sticky,
}

/// An in-memory page: DOM tree plus the layout facts the overlay queries.
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    /// Laid-out border boxes, in viewport space for fixed content and in
    /// document space otherwise.
    boxes: HashMap<NodeId, ClientRect>,
    positions: HashMap<NodeId, Position>,
    scroll: ScrollOffset,
    viewport: Size,
}

impl Document {
    /// Creates a document with an empty `<html><body>` skeleton.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        tree.append_child(NodeId::ROOT, html);
        let body = tree.create_element("body");
        tree.append_child(html, body);

        Self {
            tree,
            boxes: HashMap::new(),
            positions: HashMap::new(),
            scroll: ScrollOffset::default(),
            viewport,
        }
    }

    /// The DOM tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The DOM tree, for mutation.
    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The body element. A document created by [`Document::new`] always has
    /// one unless the host removed it.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.tree.body()
    }

    /// Creates an element with the given attributes and appends it to `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag_name: &str,
        attrs: &[(&str, &str)],
    ) -> NodeId {
        let id = self.tree.create_element(tag_name);
        if let Some(data) = self.tree.as_element_mut(id) {
            for (name, value) in attrs {
                data.set_attr(name, *value);
            }
        }
        self.tree.append_child(parent, id);
        id
    }

    /// Records the laid-out box of `node`.
    ///
    /// `rect` is in viewport space if `node` has a fixed-position ancestor
    /// (inclusive) and in document space otherwise.
    pub fn set_layout(&mut self, node: NodeId, rect: ClientRect) {
        let _ = self.boxes.insert(node, rect);
    }

    /// Sets the computed `position` of `node`.
    pub fn set_position(&mut self, node: NodeId, position: Position) {
        let _ = self.positions.insert(node, position);
    }

    /// [CSSOM § 9 getComputedStyle](https://www.w3.org/TR/cssom-1/#dom-window-getcomputedstyle)
    ///
    /// The computed `position` of `node`; `static` unless set.
    #[must_use]
    pub fn computed_position(&self, node: NodeId) -> Position {
        self.positions.get(&node).copied().unwrap_or_default()
    }

    fn is_viewport_anchored(&self, node: NodeId) -> bool {
        std::iter::once(node)
            .chain(self.tree.ancestors(node))
            .any(|id| self.computed_position(id) == Position::Fixed)
    }

    /// [§ 6.1 getBoundingClientRect()](https://www.w3.org/TR/cssom-view-1/#dom-element-getboundingclientrect)
    ///
    /// The box of `node` relative to the viewport at the current scroll
    /// offset. `None` if the node is not connected or was never laid out.
    #[must_use]
    pub fn bounding_client_rect(&self, node: NodeId) -> Option<ClientRect> {
        if !self.tree.is_connected(node) {
            return None;
        }
        let rect = *self.boxes.get(&node)?;
        if self.is_viewport_anchored(node) {
            Some(rect)
        } else {
            Some(rect.translated(-self.scroll.x, -self.scroll.y))
        }
    }

    /// The current scroll offset.
    #[must_use]
    pub const fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    /// [§ 5 scroll()](https://www.w3.org/TR/cssom-view-1/#dom-window-scroll)
    ///
    /// Scrolls to `(x, y)`, clamped so the viewport stays inside the document.
    pub fn scroll_to(&mut self, x: f32, y: f32) {
        let extent = self.document_size();
        self.scroll = ScrollOffset {
            x: x.clamp(0.0, (extent.width - self.viewport.width).max(0.0)),
            y: y.clamp(0.0, (extent.height - self.viewport.height).max(0.0)),
        };
    }

    /// The viewport size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resizes the viewport and re-clamps the scroll offset.
    pub fn resize_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        let ScrollOffset { x, y } = self.scroll;
        self.scroll_to(x, y);
    }

    /// The scrollable extent of the document: the viewport, grown to cover
    /// every connected box that scrolls with the page.
    #[must_use]
    pub fn document_size(&self) -> Size {
        self.boxes
            .iter()
            .filter(|&(&id, _)| self.tree.is_connected(id) && !self.is_viewport_anchored(id))
            .fold(self.viewport, |size, (_, rect)| Size {
                width: size.width.max(rect.right),
                height: size.height.max(rect.bottom),
            })
    }
}
