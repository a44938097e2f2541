//! Coordinate conversions.
//!
//! [§ 4 Terminology](https://www.w3.org/TR/cssom-view-1/#terminology)
//!
//! Hosts measure boxes against the viewport; lines and the hit region are
//! drawn on a layer that covers the whole document. Converting between the
//! two is a translation by the scroll offset at measurement time.

use linkline_common::warning::warn_once;
use linkline_dom::{ClientRect, Document, NodeId, Position, ScrollOffset};
use serde::Serialize;
use strum_macros::Display;

use crate::error::{LinklineError, Result};

/// A point relative to the document origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DocumentPoint {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

/// A rectangle relative to the document origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Whether the document point lies inside, edges included.
    #[must_use]
    pub fn contains(&self, point: DocumentPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Whether a box keeps its document position or its viewport position while
/// the page scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AnchorMode {
    /// Scrolls with the document.
    #[default]
    Static,
    /// Has a fixed-position ancestor (inclusive): stays put in the viewport.
    Fixed,
}

/// A viewport box together with how it is anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchoredRect {
    /// Box relative to the viewport at measurement time.
    pub rect: ClientRect,
    /// Anchoring of the element it was measured from.
    pub mode: AnchorMode,
}

/// Center of a viewport box, converted to document coordinates.
#[must_use]
pub fn center_of(rect: ClientRect, scroll: ScrollOffset) -> DocumentPoint {
    DocumentPoint {
        x: (rect.left + rect.right) / 2.0 + scroll.x,
        y: (rect.top + rect.bottom) / 2.0 + scroll.y,
    }
}

/// A viewport box converted to document coordinates.
#[must_use]
pub fn document_rect(rect: ClientRect, scroll: ScrollOffset) -> Rect {
    Rect {
        x: rect.left + scroll.x,
        y: rect.top + scroll.y,
        width: rect.width(),
        height: rect.height(),
    }
}

/// `rect` grown by `pad` on every side.
#[must_use]
pub fn buffered_rect(rect: Rect, pad: f32) -> Rect {
    Rect {
        x: rect.x - pad,
        y: rect.y - pad,
        width: rect.width + 2.0 * pad,
        height: rect.height + 2.0 * pad,
    }
}

/// Walks from `node` up to the document root and reports [`AnchorMode::Fixed`]
/// if any element on the way (inclusive) is `position: fixed`.
///
/// A fixed ancestor several levels up pins the element just as well as a
/// fixed parent, so the whole chain is searched. The walk stops after
/// `max_depth` steps; a chain that long is treated as static.
#[must_use]
pub fn positioning_mode(doc: &Document, node: NodeId, max_depth: usize) -> AnchorMode {
    let tree = doc.tree();
    let mut current = Some(node);
    let mut depth = 0;

    while let Some(id) = current {
        if depth == max_depth {
            warn_once(
                "Geometry",
                &format!("ancestor chain of {node:?} exceeds {max_depth} levels; assuming static"),
            );
            return AnchorMode::Static;
        }
        if doc.computed_position(id) == Position::Fixed {
            return AnchorMode::Fixed;
        }
        current = tree.parent(id);
        depth += 1;
    }

    AnchorMode::Static
}

/// Measures `node`: its current viewport box and its anchoring.
///
/// # Errors
///
/// Returns [`LinklineError::StaleElement`] if the node is detached or has no
/// laid-out box.
pub fn measure(doc: &Document, node: NodeId, max_depth: usize) -> Result<AnchoredRect> {
    let rect = doc
        .bounding_client_rect(node)
        .ok_or(LinklineError::StaleElement(node))?;
    Ok(AnchoredRect {
        rect,
        mode: positioning_mode(doc, node, max_depth),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkline_dom::Size;

    fn client(left: f32, top: f32, right: f32, bottom: f32) -> ClientRect {
        ClientRect {
            top,
            left,
            bottom,
            right,
        }
    }

    #[test]
    fn test_center_includes_scroll() {
        let rect = client(0.0, 0.0, 100.0, 20.0);
        let scroll = ScrollOffset { x: 5.0, y: 300.0 };

        assert_eq!(center_of(rect, scroll), DocumentPoint { x: 55.0, y: 310.0 });
        // Same layout in, same point out.
        assert_eq!(center_of(rect, scroll), center_of(rect, scroll));
    }

    #[test]
    fn test_buffered_hit_region() {
        let rect = client(50.0, 100.0, 150.0, 120.0);

        let region = buffered_rect(document_rect(rect, ScrollOffset::default()), 2.0);

        assert_eq!(
            region,
            Rect {
                x: 48.0,
                y: 98.0,
                width: 104.0,
                height: 24.0
            }
        );
        assert!(region.contains(DocumentPoint { x: 48.0, y: 122.0 }));
        assert!(!region.contains(DocumentPoint { x: 47.0, y: 110.0 }));
    }

    #[test]
    fn test_fixed_ancestor_several_levels_up() {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let body = doc.body().unwrap();
        let header = doc.append_element(body, "header", &[]);
        doc.set_position(header, Position::Fixed);
        let nav = doc.append_element(header, "nav", &[]);
        let list = doc.append_element(nav, "ul", &[]);
        let link = doc.append_element(list, "a", &[("href", "/x")]);
        let plain = doc.append_element(body, "a", &[("href", "/x")]);

        assert_eq!(positioning_mode(&doc, link, 512), AnchorMode::Fixed);
        assert_eq!(positioning_mode(&doc, header, 512), AnchorMode::Fixed);
        assert_eq!(positioning_mode(&doc, plain, 512), AnchorMode::Static);
    }

    #[test]
    fn test_absolute_and_sticky_are_static() {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let body = doc.body().unwrap();
        let aside = doc.append_element(body, "aside", &[]);
        doc.set_position(aside, Position::Absolute);
        let sticky = doc.append_element(aside, "div", &[]);
        doc.set_position(sticky, Position::Sticky);
        let link = doc.append_element(sticky, "a", &[("href", "/x")]);

        assert_eq!(positioning_mode(&doc, link, 512), AnchorMode::Static);
    }

    #[test]
    fn test_walk_is_capped() {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let body = doc.body().unwrap();
        doc.set_position(body, Position::Fixed);
        let mut parent = body;
        for _ in 0..10 {
            parent = doc.append_element(parent, "div", &[]);
        }

        assert_eq!(positioning_mode(&doc, parent, 4), AnchorMode::Static);
        assert_eq!(positioning_mode(&doc, parent, 64), AnchorMode::Fixed);
    }

    #[test]
    fn test_measure_detached_is_stale() {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let body = doc.body().unwrap();
        let link = doc.append_element(body, "a", &[("href", "/x")]);

        assert_eq!(
            measure(&doc, link, 512),
            Err(LinklineError::StaleElement(link))
        );
    }
}
