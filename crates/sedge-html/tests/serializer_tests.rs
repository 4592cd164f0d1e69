//! Tests for markup serialization, both as a tree handler and over a DOM.

use sedge_dom::NodeId;
use sedge_html::serializer::{serialize_children, serialize_node};
use sedge_html::{
    FragmentContext, ParseOptions, Serializer, parse_document, parse_fragment, parse_into,
    serialize_document,
};

fn body(html: &str) -> String {
    format!("<html><head></head><body>{html}</body></html>")
}

#[test]
fn test_serialize_simple_document() {
    assert_eq!(
        serialize_document("<p>Hello <b>world</b></p>"),
        body("<p>Hello <b>world</b></p>")
    );
}

#[test]
fn test_serialization_is_idempotent() {
    let inputs = [
        "<p>Hello <b>world</b></p>",
        "<!DOCTYPE html><title>t &amp; u</title><p class=x>a<br>b",
        "<b>1<p>2</b>3</p>",
        "<table>text<tr><td>cell</table>",
        "<pre>\n\nx</pre><textarea>\ny</textarea>",
        "<svg viewBox='0 0 1 1'><circle/></svg>",
        "<template><td>x</td></template><!--c-->",
    ];
    for input in inputs {
        let once = serialize_document(input);
        let twice = serialize_document(&once);
        assert_eq!(once, twice, "{input}");
    }
}

#[test]
fn test_doctype_and_comments() {
    assert_eq!(
        serialize_document("<!DOCTYPE html><!--a--><p>x<!--b-->"),
        "<!DOCTYPE html><!--a--><html><head></head><body><p>x<!--b--></p></body></html>"
    );
}

#[test]
fn test_text_and_attribute_escaping() {
    assert_eq!(
        serialize_document("<p title='a\"b&amp;c<>'>1 &lt; 2 &amp; 3&nbsp;&gt;</p>"),
        body("<p title=\"a&quot;b&amp;c<>\">1 &lt; 2 &amp; 3&nbsp;&gt;</p>")
    );
}

#[test]
fn test_void_elements_have_no_end_tag() {
    assert_eq!(
        serialize_document("<br><img src=x><input disabled></input>"),
        body("<br><img src=\"x\"><input disabled=\"\">")
    );
}

#[test]
fn test_raw_text_is_not_escaped() {
    assert_eq!(
        serialize_document("<script>if (a < b && c) {}</script><style>p > a {}</style>"),
        "<html><head><script>if (a < b && c) {}</script><style>p > a {}</style></head><body></body></html>"
    );
}

#[test]
fn test_noscript_depends_on_scripting() {
    let input = "<body><noscript>a<b>c</b></noscript>";
    let scripted = parse_into(input, Serializer::new(), &ParseOptions::default())
        .expect("valid options")
        .finish()
        .0;
    assert_eq!(scripted, body("<noscript>a<b>c</b></noscript>"));

    let options = ParseOptions::default().with_scripting(false);
    let unscripted = parse_into(input, Serializer::new().with_scripting(false), &options)
        .expect("valid options")
        .finish()
        .0;
    assert_eq!(unscripted, body("<noscript>a<b>c</b></noscript>"));
}

#[test]
fn test_leading_newline_is_restored_in_pre() {
    assert_eq!(
        serialize_document("<pre>\n\nx</pre>"),
        body("<pre>\n\nx</pre>")
    );
    assert_eq!(serialize_document("<pre>\nx</pre>"), body("<pre>x</pre>"));
}

#[test]
fn test_template_contents_are_serialized() {
    assert_eq!(
        serialize_document("<template><p>x</p></template>"),
        "<html><head><template><p>x</p></template></head><body></body></html>"
    );
}

#[test]
fn test_foreign_elements_get_end_tags() {
    assert_eq!(
        serialize_document("<svg viewbox='0 0 1 1'><circle/></svg>"),
        body("<svg viewBox=\"0 0 1 1\"><circle></circle></svg>")
    );
}

#[test]
fn test_misnested_markup_is_serialized_after_repair() {
    assert_eq!(
        serialize_document("<b>1<p>2</b>3</p>"),
        body("<b>1</b><p><b>2</b>3</p>")
    );
    assert_eq!(
        serialize_document("<table>text<tr><td>cell</table>"),
        body("text<table><tbody><tr><td>cell</td></tr></tbody></table>")
    );
}

#[test]
fn test_output_is_available_only_after_end_of_document() {
    let serializer = Serializer::new();
    assert!(serializer.output().is_none());

    let serializer =
        parse_into("<p>x", serializer, &ParseOptions::default()).expect("valid options");
    assert_eq!(serializer.output(), Some(body("<p>x</p>").as_str()));
    assert!(!serializer.issues().is_empty());
}

#[test]
fn test_serialize_dom_nodes() {
    let (tree, _) = parse_document("<div id=a><p>x</p>y</div>");
    let div = tree.find_element(NodeId::ROOT, "div").expect("div");
    assert_eq!(serialize_node(&tree, div, true), "<div id=\"a\"><p>x</p>y</div>");
    assert_eq!(serialize_children(&tree, div, true), "<p>x</p>y");
}

#[test]
fn test_serialize_fragment_children() {
    let (tree, root, _) =
        parse_fragment("<td>1</td><td>2</td>", &FragmentContext::html("tr")).expect("valid context");
    assert_eq!(serialize_children(&tree, root, true), "<td>1</td><td>2</td>");
}

#[test]
fn test_serialize_dom_nodes_honors_scripting() {
    // Parsed with scripting on, so the noscript content is one raw text run.
    let (tree, _) = parse_document("<noscript>&lt;b&gt;</noscript>");
    let noscript = tree.find_element(NodeId::ROOT, "noscript").expect("noscript");
    assert_eq!(serialize_children(&tree, noscript, true), "&lt;b&gt;");
    assert_eq!(serialize_children(&tree, noscript, false), "&amp;lt;b&amp;gt;");
    assert_eq!(
        serialize_node(&tree, noscript, false),
        "<noscript>&amp;lt;b&amp;gt;</noscript>"
    );
}
