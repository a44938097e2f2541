//! Tests for the host document model: bounding boxes under scrolling, fixed
//! positioning, document extent.

use std::str::FromStr;

use linkline_dom::{ClientRect, Document, Position, ScrollOffset, Size};

fn rect(left: f32, top: f32, right: f32, bottom: f32) -> ClientRect {
    ClientRect {
        top,
        left,
        bottom,
        right,
    }
}

fn tall_document() -> Document {
    let mut doc = Document::new(Size::new(800.0, 600.0));
    let body = doc.body().unwrap();
    let filler = doc.append_element(body, "div", &[]);
    doc.set_layout(filler, rect(0.0, 0.0, 1200.0, 5000.0));
    doc
}

#[test]
fn test_flow_box_moves_with_scroll() {
    let mut doc = tall_document();
    let body = doc.body().unwrap();
    let link = doc.append_element(body, "a", &[("href", "/x")]);
    doc.set_layout(link, rect(10.0, 300.0, 60.0, 320.0));

    doc.scroll_to(0.0, 100.0);

    assert_eq!(doc.bounding_client_rect(link), Some(rect(10.0, 200.0, 60.0, 220.0)));
}

#[test]
fn test_fixed_subtree_stays_in_viewport() {
    let mut doc = tall_document();
    let body = doc.body().unwrap();
    let nav = doc.append_element(body, "nav", &[]);
    doc.set_position(nav, Position::Fixed);
    let wrapper = doc.append_element(nav, "span", &[]);
    let link = doc.append_element(wrapper, "a", &[("href", "/x")]);
    doc.set_layout(link, rect(0.0, 0.0, 40.0, 20.0));

    doc.scroll_to(0.0, 250.0);

    assert_eq!(doc.bounding_client_rect(link), Some(rect(0.0, 0.0, 40.0, 20.0)));
}

#[test]
fn test_detached_node_has_no_box() {
    let mut doc = tall_document();
    let body = doc.body().unwrap();
    let link = doc.append_element(body, "a", &[("href", "/x")]);
    doc.set_layout(link, rect(0.0, 0.0, 40.0, 20.0));

    doc.tree_mut().remove_child(body, link);

    assert_eq!(doc.bounding_client_rect(link), None);
}

#[test]
fn test_scroll_is_clamped_to_document_extent() {
    let mut doc = tall_document();

    doc.scroll_to(-50.0, 10_000.0);

    assert_eq!(doc.scroll(), ScrollOffset { x: 0.0, y: 4400.0 });
}

#[test]
fn test_document_size_grows_with_late_layout() {
    let mut doc = Document::new(Size::new(800.0, 600.0));
    assert_eq!(doc.document_size(), Size::new(800.0, 600.0));

    let body = doc.body().unwrap();
    let img = doc.append_element(body, "img", &[]);
    doc.set_layout(img, rect(0.0, 0.0, 300.0, 2000.0));

    assert_eq!(doc.document_size(), Size::new(800.0, 2000.0));
}

#[test]
fn test_position_keywords() {
    assert_eq!(Position::from_str("fixed"), Ok(Position::Fixed));
    assert_eq!(Position::Sticky.to_string(), "sticky");
    assert!(Position::from_str("floating").is_err());
}
