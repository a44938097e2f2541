//! The drawing layer.
//!
//! One `<svg>` covering the whole document holds every line of a session,
//! followed by the hit region: a `<rect>` wrapped in an `<a>` so it can be
//! activated like the link it covers.
//!
//! ```text
//! <svg id="-linkline-layer" width=… height=… style="display:none">
//!   <line class="-linkline-linkline" …/>            ← drawn lines, in order
//!   <line class="-linkline-linkline -linkline-fixed-endpoint" …/>
//!   <a id="-linkline-hitbox-link" href=…>           ← always last child
//!     <rect id="-linkline-hitbox" x=… y=… width=… height=…/>
//!   </a>
//! </svg>
//! ```
//!
//! The layer is created once and never removed; sessions only toggle its
//! visibility and swap its lines.

use linkline_dom::{Document, NodeId};

use crate::error::{LinklineError, Result};
use crate::geometry::{DocumentPoint, Rect};
use crate::markers::Marker;

const HIDDEN: &str = "display:none";
const SHOWN: &str = "display:unset";

/// Node ids of the overlay's persistent elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayNodes {
    /// The `<svg>` layer.
    pub layer: NodeId,
    /// The `<a>` wrapping the hit region.
    pub hit_region_link: NodeId,
    /// The `<rect>` hit region.
    pub hit_region: NodeId,
}

/// Owner of the drawing layer and the hit region.
#[derive(Debug, Default)]
pub struct Overlay {
    nodes: Option<OverlayNodes>,
}

impl Overlay {
    /// An overlay whose layer has not been created yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: None }
    }

    /// The persistent nodes, if created.
    #[must_use]
    pub const fn nodes(&self) -> Option<OverlayNodes> {
        self.nodes
    }

    /// Whether the layer exists.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.nodes.is_some()
    }

    /// Creates the layer on first use and sizes it to the document.
    ///
    /// Safe to call any number of times: it is re-run on `load` and `resize`
    /// because the document keeps growing while images arrive. If the host
    /// removed the layer it is attached again.
    pub fn ensure_initialized(&mut self, doc: &mut Document) -> OverlayNodes {
        let nodes = match self.nodes {
            Some(nodes) if doc.tree().is_connected(nodes.layer) => nodes,
            Some(nodes) => {
                let parent = mount_point(doc);
                doc.tree_mut().append_child(parent, nodes.layer);
                nodes
            }
            None => create_layer(doc),
        };
        self.nodes = Some(nodes);

        let size = doc.document_size();
        if let Some(layer) = doc.tree_mut().as_element_mut(nodes.layer) {
            layer.set_attr("width", size.width.to_string());
            layer.set_attr("height", size.height.to_string());
        }
        nodes
    }

    /// Makes the layer visible.
    pub fn show(&mut self, doc: &mut Document) {
        let nodes = self.ensure_initialized(doc);
        if let Some(layer) = doc.tree_mut().as_element_mut(nodes.layer) {
            layer.set_attr("style", SHOWN);
        }
    }

    /// Hides the layer, removes every drawn line and clears the hit region's
    /// target so nothing stale can be activated.
    pub fn hide(&mut self, doc: &mut Document) {
        let Some(nodes) = self.nodes else {
            return;
        };
        for line in self.lines(doc) {
            doc.tree_mut().remove_child(nodes.layer, line);
        }
        let tree = doc.tree_mut();
        if let Some(layer) = tree.as_element_mut(nodes.layer) {
            layer.set_attr("style", HIDDEN);
        }
        if let Some(link) = tree.as_element_mut(nodes.hit_region_link) {
            link.set_attr("href", "");
        }
    }

    /// Whether the layer is currently shown.
    #[must_use]
    pub fn is_visible(&self, doc: &Document) -> bool {
        self.nodes
            .and_then(|nodes| doc.tree().as_element(nodes.layer))
            .is_some_and(|layer| layer.attr("style") == Some(SHOWN))
    }

    /// Appends a line between two document points and returns its node.
    ///
    /// The line goes in front of the hit-region link, which therefore stays
    /// the top-most element for pointer events.
    pub fn draw_line(
        &mut self,
        doc: &mut Document,
        from: DocumentPoint,
        to: DocumentPoint,
        fixed_endpoint: bool,
    ) -> NodeId {
        let nodes = self.ensure_initialized(doc);
        let tree = doc.tree_mut();
        let line = tree.create_element("line");
        if let Some(data) = tree.as_element_mut(line) {
            let class = if fixed_endpoint {
                format!("{} {}", Marker::Line, Marker::FixedEndpoint)
            } else {
                Marker::Line.to_string()
            };
            data.set_attr("class", class);
        }
        tree.insert_before(nodes.layer, line, nodes.hit_region_link);
        set_endpoints(doc, line, from, to);
        line
    }

    /// Moves the endpoints of an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`LinklineError::StaleElement`] if `line` is no longer one of
    /// this layer's lines.
    pub fn move_line(
        &self,
        doc: &mut Document,
        line: NodeId,
        from: DocumentPoint,
        to: DocumentPoint,
    ) -> Result<()> {
        let nodes = self.nodes.ok_or(LinklineError::OverlayMissing)?;
        if doc.tree().parent(line) != Some(nodes.layer) {
            return Err(LinklineError::StaleElement(line));
        }
        set_endpoints(doc, line, from, to);
        Ok(())
    }

    /// Moves and resizes the hit region to cover `rect` exactly.
    pub fn position_hit_region(&mut self, doc: &mut Document, rect: Rect) {
        let nodes = self.ensure_initialized(doc);
        if let Some(region) = doc.tree_mut().as_element_mut(nodes.hit_region) {
            region.set_attr("x", rect.x.to_string());
            region.set_attr("y", rect.y.to_string());
            region.set_attr("width", rect.width.to_string());
            region.set_attr("height", rect.height.to_string());
        }
    }

    /// Points the hit-region link at `href`.
    pub fn set_hit_target(&mut self, doc: &mut Document, href: &str) {
        let nodes = self.ensure_initialized(doc);
        if let Some(link) = doc.tree_mut().as_element_mut(nodes.hit_region_link) {
            link.set_attr("href", href);
        }
    }

    /// The hit-region link's target; `None` when cleared.
    #[must_use]
    pub fn hit_target<'a>(&self, doc: &'a Document) -> Option<&'a str> {
        let nodes = self.nodes?;
        doc.tree()
            .as_element(nodes.hit_region_link)
            .and_then(|link| link.href())
            .filter(|href| !href.is_empty())
    }

    /// The hit region's current rectangle, if it has been positioned.
    #[must_use]
    pub fn hit_region(&self, doc: &Document) -> Option<Rect> {
        let region = doc.tree().as_element(self.nodes?.hit_region)?;
        let num = |name: &str| region.attr(name)?.parse::<f32>().ok();
        Some(Rect {
            x: num("x")?,
            y: num("y")?,
            width: num("width")?,
            height: num("height")?,
        })
    }

    /// The line nodes currently in the layer, in render order.
    #[must_use]
    pub fn lines(&self, doc: &Document) -> Vec<NodeId> {
        let Some(nodes) = self.nodes else {
            return Vec::new();
        };
        let tree = doc.tree();
        tree.children(nodes.layer)
            .iter()
            .copied()
            .filter(|&id| {
                tree.as_element(id)
                    .is_some_and(|e| e.classes().contains(Marker::Line.as_str()))
            })
            .collect()
    }

    /// Endpoints of a line and whether its far end is scroll-adjusted.
    #[must_use]
    pub fn line_geometry(
        &self,
        doc: &Document,
        line: NodeId,
    ) -> Option<(DocumentPoint, DocumentPoint, bool)> {
        let data = doc.tree().as_element(line)?;
        let num = |name: &str| data.attr(name)?.parse::<f32>().ok();
        let from = DocumentPoint {
            x: num("x1")?,
            y: num("y1")?,
        };
        let to = DocumentPoint {
            x: num("x2")?,
            y: num("y2")?,
        };
        let fixed = data.classes().contains(Marker::FixedEndpoint.as_str());
        Some((from, to, fixed))
    }

    /// Whether `node` is the layer itself or lives inside it.
    #[must_use]
    pub fn contains(&self, doc: &Document, node: NodeId) -> bool {
        self.nodes.is_some_and(|nodes| {
            node == nodes.layer || doc.tree().is_descendant_of(node, nodes.layer)
        })
    }
}

/// Where the layer hangs: `<body>`, else the document element, else the root.
fn mount_point(doc: &Document) -> NodeId {
    doc.body()
        .or_else(|| doc.tree().document_element())
        .unwrap_or(NodeId::ROOT)
}

fn create_layer(doc: &mut Document) -> OverlayNodes {
    let parent = mount_point(doc);
    let layer = doc.append_element(
        parent,
        "svg",
        &[("id", Marker::Layer.as_str()), ("style", HIDDEN)],
    );
    let hit_region_link = doc.append_element(
        layer,
        "a",
        &[("id", Marker::HitRegionLink.as_str()), ("href", "")],
    );
    let hit_region = doc.append_element(
        hit_region_link,
        "rect",
        &[("id", Marker::HitRegion.as_str())],
    );

    OverlayNodes {
        layer,
        hit_region_link,
        hit_region,
    }
}

fn set_endpoints(doc: &mut Document, line: NodeId, from: DocumentPoint, to: DocumentPoint) {
    if let Some(data) = doc.tree_mut().as_element_mut(line) {
        data.set_attr("x1", from.x.to_string());
        data.set_attr("y1", from.y.to_string());
        data.set_attr("x2", to.x.to_string());
        data.set_attr("y2", to.y.to_string());
    }
}
