//! Tests for the html5lib-style dump, JSON view and namespace parsing.

use std::str::FromStr;

use sedge_dom::{Attributes, DomTree, ElementData, Namespace, NodeId, NodeType, QuirksMode};

fn element(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    let id = tree.alloc_element(ElementData::html(tag));
    tree.append_child(parent, id);
    id
}

#[test]
fn test_dump_nested_elements_and_sorted_attributes() {
    let mut tree = DomTree::new();
    let html = element(&mut tree, NodeId::ROOT, "html");
    let _ = element(&mut tree, html, "head");
    let body = element(&mut tree, html, "body");
    let p = tree.alloc_element(ElementData {
        attrs: [("title", "t"), ("class", "c")].into_iter().collect(),
        ..ElementData::html("p")
    });
    tree.append_child(body, p);
    tree.append_text(p, "Hi");

    let expected = "\
| <html>
|   <head>
|   <body>
|     <p>
|       class=\"c\"
|       title=\"t\"
|       \"Hi\"
";
    assert_eq!(tree.dump(), expected);
}

#[test]
fn test_dump_doctype_comment_and_foreign() {
    let mut tree = DomTree::new();
    let doctype = tree.alloc(NodeType::Doctype {
        name: "html".to_string(),
        public_id: String::new(),
        system_id: String::new(),
    });
    tree.append_child(NodeId::ROOT, doctype);
    let comment = tree.alloc(NodeType::Comment(" c ".to_string()));
    tree.append_child(NodeId::ROOT, comment);
    let svg = tree.alloc_element(ElementData {
        namespace: Namespace::Svg,
        attrs: [("xlink:href", "#a")].into_iter().collect(),
        ..ElementData::html("svg")
    });
    tree.append_child(NodeId::ROOT, svg);

    let expected = "\
| <!DOCTYPE html>
| <!--  c  -->
| <svg svg>
|   xlink href=\"#a\"
";
    assert_eq!(tree.dump(), expected);
}

#[test]
fn test_dump_template_contents() {
    let mut tree = DomTree::new();
    let template = element(&mut tree, NodeId::ROOT, "template");
    let contents = tree.template_contents(template).expect("template has contents");
    let _ = element(&mut tree, contents, "td");

    assert_eq!(tree.dump(), "| <template>\n|   content\n|     <td>\n");
}

#[test]
fn test_node_ref_serializes_to_json() {
    let mut tree = DomTree::new();
    tree.set_quirks_mode(QuirksMode::Quirks);
    let div = element(&mut tree, NodeId::ROOT, "div");
    tree.append_text(div, "x");

    let json = serde_json::to_value(tree.node_ref(NodeId::ROOT)).expect("serializable");
    assert_eq!(json["type"], "document");
    assert_eq!(json["mode"], "quirks");
    assert_eq!(json["children"][0]["tagName"], "div");
    assert_eq!(json["children"][0]["namespace"], "html");
    assert_eq!(json["children"][0]["children"][0]["content"], "x");
}

#[test]
fn test_namespace_from_str_accepts_names_and_urls() {
    assert_eq!(Namespace::from_str("svg"), Ok(Namespace::Svg));
    assert_eq!(
        Namespace::from_str("http://www.w3.org/1998/Math/MathML"),
        Ok(Namespace::MathMl)
    );
    assert_eq!(Namespace::from_str("mathml"), Ok(Namespace::MathMl));
    assert!(Namespace::from_str("xul").is_err());
    assert_eq!(Namespace::Html.to_string(), "html");
}

#[test]
fn test_attributes_first_wins_and_merge() {
    let mut attrs: Attributes = [("a", "1"), ("a", "2"), ("b", "3")].into_iter().collect();
    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs.get("a"), Some("1"));

    let extra: Attributes = [("b", "x"), ("c", "4")].into_iter().collect();
    assert_eq!(attrs.merge_missing(&extra), 1);
    assert_eq!(attrs.get("b"), Some("3"));
    assert_eq!(attrs.get("c"), Some("4"));
}
