//! Tests for DOM tree mutation and traversal: insert_before, remove_child,
//! descendants, connectedness.

use linkline_dom::{DomTree, NodeId};

fn element(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    let id = tree.create_element(tag);
    tree.append_child(parent, id);
    id
}

// ========== insert_before ==========

#[test]
fn test_insert_before_keeps_reference_last() {
    let mut tree = DomTree::new();
    let svg = element(&mut tree, NodeId::ROOT, "svg");
    let hitbox = element(&mut tree, svg, "a");

    let first = tree.create_element("path");
    tree.insert_before(svg, first, hitbox);
    let second = tree.create_element("path");
    tree.insert_before(svg, second, hitbox);

    assert_eq!(tree.children(svg), &[first, second, hitbox]);
    assert_eq!(tree.last_child(svg), Some(hitbox));
    assert_eq!(tree.prev_sibling(hitbox), Some(second));
    assert_eq!(tree.next_sibling(first), Some(second));
    assert_eq!(tree.prev_sibling(first), None);
}

#[test]
fn test_insert_before_unknown_reference_appends() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let a = element(&mut tree, parent, "a");
    let stranger = tree.create_element("span");

    let b = tree.create_element("b");
    tree.insert_before(parent, b, stranger);

    assert_eq!(tree.children(parent), &[a, b]);
}

#[test]
fn test_insert_before_moves_attached_node() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let a = element(&mut tree, parent, "a");
    let b = element(&mut tree, parent, "b");
    let c = element(&mut tree, parent, "c");

    tree.insert_before(parent, a, c);

    assert_eq!(tree.children(parent), &[b, a, c]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.next_sibling(a), Some(c));
}

// ========== remove_child ==========

#[test]
fn test_remove_child_middle_relinks_siblings() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let a = element(&mut tree, parent, "a");
    let b = element(&mut tree, parent, "b");
    let c = element(&mut tree, parent, "c");

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
    assert_eq!(tree.parent(b), None);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_remove_child_of_other_parent_is_noop() {
    let mut tree = DomTree::new();
    let p1 = element(&mut tree, NodeId::ROOT, "div");
    let p2 = element(&mut tree, NodeId::ROOT, "div");
    let child = element(&mut tree, p1, "a");

    tree.remove_child(p2, child);

    assert_eq!(tree.parent(child), Some(p1));
    assert_eq!(tree.children(p1), &[child]);
}

// ========== traversal ==========

#[test]
fn test_descendants_in_tree_order() {
    let mut tree = DomTree::new();
    let html = element(&mut tree, NodeId::ROOT, "html");
    let body = element(&mut tree, html, "body");
    let p = element(&mut tree, body, "p");
    let a = element(&mut tree, p, "a");
    let div = element(&mut tree, body, "div");

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![html, body, p, a, div]);
    assert_eq!(tree.body(), Some(body));
    assert_eq!(tree.document_element(), Some(html));
}

#[test]
fn test_detached_subtree_is_not_connected() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    let link = element(&mut tree, div, "a");
    assert!(tree.is_connected(link));

    tree.remove_child(NodeId::ROOT, div);

    assert!(!tree.is_connected(link));
    assert!(!tree.is_connected(NodeId(999)));
    assert!(tree.is_connected(NodeId::ROOT));
}

#[test]
fn test_get_element_by_id() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    if let Some(data) = tree.as_element_mut(div) {
        data.set_attr("id", "target");
    }

    assert_eq!(tree.get_element_by_id("target"), Some(div));
    assert_eq!(tree.get_element_by_id("missing"), None);
    assert_eq!(tree.get_element_by_id(""), None);
}

#[test]
fn test_hyperlink_detection() {
    let mut tree = DomTree::new();
    let link = element(&mut tree, NodeId::ROOT, "a");
    let anchor = element(&mut tree, NodeId::ROOT, "a");
    let area = element(&mut tree, NodeId::ROOT, "AREA");
    if let Some(data) = tree.as_element_mut(link) {
        data.set_attr("href", "/x");
    }
    if let Some(data) = tree.as_element_mut(area) {
        data.set_attr("href", "");
    }

    assert!(tree.as_element(link).is_some_and(|e| e.is_hyperlink()));
    assert!(tree.as_element(area).is_some_and(|e| e.is_hyperlink()));
    assert!(!tree.as_element(anchor).is_some_and(|e| e.is_hyperlink()));
    assert_eq!(tree.as_element(link).and_then(|e| e.href()), Some("/x"));
}
