//! Tests for DOM tree mutation: the operations the tree builder's
//! handler needs for moving, reparenting and detaching nodes.

use sedge_dom::{DomTree, ElementData, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc_element(ElementData::html(tag))
}

/// Helper to build `parent` with the named children appended in order.
fn with_children(tree: &mut DomTree, parent: &str, tags: &[&str]) -> (NodeId, Vec<NodeId>) {
    let parent = alloc_element(tree, parent);
    tree.append_child(NodeId::ROOT, parent);
    let children = tags
        .iter()
        .map(|tag| {
            let id = alloc_element(tree, tag);
            tree.append_child(parent, id);
            id
        })
        .collect();
    (parent, children)
}

/// Walk `parent`'s child list and check every parent and sibling link.
fn assert_links_match_children(tree: &DomTree, parent: NodeId) {
    let children = tree.children(parent);
    for (i, &child) in children.iter().enumerate() {
        assert_eq!(tree.parent(child), Some(parent));
        assert_eq!(tree.prev_sibling(child), i.checked_sub(1).map(|p| children[p]));
        assert_eq!(tree.next_sibling(child), children.get(i + 1).copied());
    }
}

// ========== remove_child ==========

#[test]
fn test_remove_only_child_clears_links() {
    let mut tree = DomTree::new();
    let (body, kids) = with_children(&mut tree, "body", &["frameset"]);

    tree.remove_child(body, kids[0]);

    assert!(tree.children(body).is_empty());
    assert_eq!(tree.parent(kids[0]), None);
    assert_eq!(tree.prev_sibling(kids[0]), None);
    assert_eq!(tree.next_sibling(kids[0]), None);
}

#[test]
fn test_remove_middle_child_relinks_neighbours() {
    let mut tree = DomTree::new();
    let (ul, kids) = with_children(&mut tree, "ul", &["li", "li", "li"]);

    tree.remove_child(ul, kids[1]);

    assert_eq!(tree.children(ul), &[kids[0], kids[2]]);
    assert_eq!(tree.next_sibling(kids[0]), Some(kids[2]));
    assert_eq!(tree.prev_sibling(kids[2]), Some(kids[0]));
}

#[test]
fn test_remove_child_of_wrong_parent_is_noop() {
    let mut tree = DomTree::new();
    let (a, a_kids) = with_children(&mut tree, "div", &["p"]);
    let (b, _) = with_children(&mut tree, "div", &[]);

    tree.remove_child(b, a_kids[0]);

    assert_eq!(tree.children(a), &[a_kids[0]]);
    assert_eq!(tree.parent(a_kids[0]), Some(a));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_table_for_foster_parenting() {
    let mut tree = DomTree::new();
    let (body, kids) = with_children(&mut tree, "body", &["table"]);

    let fostered = alloc_element(&mut tree, "b");
    tree.insert_before(body, fostered, kids[0]);

    assert_eq!(tree.children(body), &[fostered, kids[0]]);
    assert_eq!(tree.prev_sibling(kids[0]), Some(fostered));
    assert_eq!(tree.next_sibling(fostered), Some(kids[0]));
    assert_eq!(tree.prev_sibling(fostered), None);
}

#[test]
fn test_insert_before_moves_attached_node() {
    let mut tree = DomTree::new();
    let (div, kids) = with_children(&mut tree, "div", &["a", "b", "c"]);

    // Move "c" in front of "a".
    tree.insert_before(div, kids[2], kids[0]);

    assert_eq!(tree.children(div), &[kids[2], kids[0], kids[1]]);
    assert_eq!(tree.next_sibling(kids[1]), None);
}

#[test]
fn test_insert_before_missing_reference_appends() {
    let mut tree = DomTree::new();
    let (div, kids) = with_children(&mut tree, "div", &["a"]);
    let stray = alloc_element(&mut tree, "stray");
    let new = alloc_element(&mut tree, "b");

    tree.insert_before(div, new, stray);

    assert_eq!(tree.children(div), &[kids[0], new]);
}

// ========== append_child / move_children ==========

#[test]
fn test_append_child_reparents() {
    let mut tree = DomTree::new();
    let (from, kids) = with_children(&mut tree, "p", &["b"]);
    let (to, _) = with_children(&mut tree, "div", &[]);

    tree.append_child(to, kids[0]);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.parent(kids[0]), Some(to));
}

#[test]
fn test_move_children_then_append_wrapper() {
    // The shape produced when a misnested formatting element is cloned:
    // the furthest block's children move into the clone, which then becomes
    // the block's only child.
    let mut tree = DomTree::new();
    let (block, kids) = with_children(&mut tree, "p", &["i", "u"]);
    let clone = alloc_element(&mut tree, "b");

    tree.move_children(block, clone);
    tree.append_child(block, clone);

    assert_eq!(tree.children(block), &[clone]);
    assert_eq!(tree.children(clone), &[kids[0], kids[1]]);
    assert_eq!(tree.parent(kids[1]), Some(clone));
    assert_eq!(tree.next_sibling(kids[0]), Some(kids[1]));
}

#[test]
fn test_move_children_appends_after_existing() {
    let mut tree = DomTree::new();
    let (from, moved) = with_children(&mut tree, "div", &["y"]);
    let (to, existing) = with_children(&mut tree, "span", &["x"]);

    tree.move_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[existing[0], moved[0]]);
    assert_eq!(tree.prev_sibling(moved[0]), Some(existing[0]));
}

#[test]
fn test_sibling_links_survive_mixed_mutations() {
    let mut tree = DomTree::new();
    let names = ["td"; 200];
    let (tr, kids) = with_children(&mut tree, "tr", &names);
    let (table, _) = with_children(&mut tree, "table", &[]);

    // Foster-parenting shape: many nodes inserted in front of one reference.
    for _ in 0..100 {
        let span = alloc_element(&mut tree, "span");
        tree.insert_before(tr, span, kids[100]);
    }
    for &kid in kids.iter().step_by(3) {
        tree.remove_child(tr, kid);
    }
    tree.insert_before(tr, kids[0], kids[1]);
    tree.move_children(tr, table);
    tree.append_child(table, kids[3]);

    assert!(tree.children(tr).is_empty());
    // 300 children, 67 removed, two of those put back.
    assert_eq!(tree.children(table).len(), 300 - 67 + 2);
    assert_eq!(tree.last_child(table), Some(kids[3]));
    assert_links_match_children(&tree, table);
}

// ========== text merging ==========

#[test]
fn test_append_text_merges_adjacent_runs() {
    let mut tree = DomTree::new();
    let (p, _) = with_children(&mut tree, "p", &[]);

    tree.append_text(p, "Hello ");
    tree.append_text(p, "world");

    assert_eq!(tree.children(p).len(), 1);
    assert_eq!(tree.text_content(p), "Hello world");
}

#[test]
fn test_insert_text_before_merges_with_previous_text() {
    let mut tree = DomTree::new();
    let (body, kids) = with_children(&mut tree, "body", &["table"]);

    tree.insert_text_before(body, "foo", kids[0]);
    tree.insert_text_before(body, "bar", kids[0]);

    assert_eq!(tree.children(body).len(), 2);
    let text = tree.children(body)[0];
    assert_eq!(tree.as_text(text), Some("foobar"));
    assert!(matches!(
        tree.get(kids[0]).map(|n| &n.node_type),
        Some(NodeType::Element(_))
    ));
}

#[test]
fn test_template_gets_contents_fragment() {
    let mut tree = DomTree::new();
    let template = alloc_element(&mut tree, "template");
    let contents = tree.template_contents(template);

    assert!(contents.is_some());
    assert!(matches!(
        contents.and_then(|id| tree.get(id)).map(|n| &n.node_type),
        Some(NodeType::DocumentFragment)
    ));
    let div = alloc_element(&mut tree, "div");
    assert_eq!(tree.template_contents(div), None);
}
