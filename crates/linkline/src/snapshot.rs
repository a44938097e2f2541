//! Debug views of the overlay layer.
//!
//! [`OverlaySnapshot`] reads the layer back out of the document (so it shows
//! what was actually rendered, not what the session believes it drew) and
//! serializes with serde. [`render_svg`] prints the layer as markup.

use std::fmt::Write;

use linkline_dom::{Document, NodeId, NodeType, Size};
use serde::Serialize;

use crate::geometry::{DocumentPoint, Rect};
use crate::overlay::Overlay;

/// One rendered line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSnapshot {
    /// Hovered end.
    pub from: DocumentPoint,
    /// Far end.
    pub to: DocumentPoint,
    /// Whether the far end follows scrolling.
    pub fixed_endpoint: bool,
}

/// The overlay layer as rendered into the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySnapshot {
    /// Whether the layer is shown.
    pub visible: bool,
    /// Layer size; zero before initialization.
    pub size: Size,
    /// Hit region rectangle, once positioned.
    pub hit_region: Option<Rect>,
    /// Hit region link target, `None` when cleared.
    pub hit_target: Option<String>,
    /// Lines in render order.
    pub lines: Vec<LineSnapshot>,
}

impl OverlaySnapshot {
    /// Reads the layer out of `doc`.
    #[must_use]
    pub fn capture(overlay: &Overlay, doc: &Document) -> Self {
        let size = overlay
            .nodes()
            .and_then(|nodes| doc.tree().as_element(nodes.layer))
            .map(|layer| {
                let num = |name: &str| {
                    layer
                        .attr(name)
                        .and_then(|v| v.parse::<f32>().ok())
                        .unwrap_or_default()
                };
                Size::new(num("width"), num("height"))
            })
            .unwrap_or_default();

        let lines = overlay
            .lines(doc)
            .into_iter()
            .filter_map(|line| overlay.line_geometry(doc, line))
            .map(|(from, to, fixed_endpoint)| LineSnapshot {
                from,
                to,
                fixed_endpoint,
            })
            .collect();

        Self {
            visible: overlay.is_visible(doc),
            size,
            hit_region: overlay.hit_region(doc),
            hit_target: overlay.hit_target(doc).map(str::to_string),
            lines,
        }
    }
}

/// The overlay layer as SVG markup, or an empty string before
/// initialization. Attributes are sorted by name.
#[must_use]
pub fn render_svg(overlay: &Overlay, doc: &Document) -> String {
    let mut out = String::new();
    if let Some(nodes) = overlay.nodes() {
        write_node(doc, nodes.layer, 0, &mut out);
    }
    out
}

fn write_node(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let Some(node) = doc.tree().get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Element(data) => {
            let mut attrs: Vec<_> = data.attrs.iter().collect();
            attrs.sort();
            let _ = write!(out, "{indent}<{}", data.tag_name);
            for (name, value) in attrs {
                let _ = write!(out, " {name}=\"{}\"", escape(value));
            }
            if node.children.is_empty() {
                out.push_str("/>\n");
            } else {
                out.push_str(">\n");
                for &child in &node.children {
                    write_node(doc, child, depth + 1, out);
                }
                let _ = writeln!(out, "{indent}</{}>", data.tag_name);
            }
        }
        NodeType::Text(text) => {
            let _ = writeln!(out, "{indent}{}", escape(text));
        }
        NodeType::Document | NodeType::Comment(_) => {}
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
