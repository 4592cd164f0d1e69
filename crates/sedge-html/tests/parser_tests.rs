//! Integration tests for tree construction, checked against html5lib-style
//! dumps of the resulting DOM.

use sedge_dom::{DomTree, NodeId, NodeType, QuirksMode};
use sedge_html::parse_document;

/// Helper to parse HTML and return the DOM tree
fn parse(html: &str) -> DomTree {
    parse_document(html).0
}

/// Helper to parse and dump in one go
fn dump(html: &str) -> String {
    parse(html).dump()
}

/// Direct element children of `parent` with the given tag name
fn element_children(tree: &DomTree, parent: NodeId, tag: &str) -> Vec<NodeId> {
    tree.children(parent)
        .iter()
        .copied()
        .filter(|&id| tree.as_element(id).is_some_and(|e| e.tag_name == tag))
        .collect()
}

#[test]
fn test_document_structure() {
    let tree = parse("<!DOCTYPE html><html><head></head><body></body></html>");
    assert!(matches!(
        tree.get(NodeId::ROOT).map(|n| &n.node_type),
        Some(NodeType::Document)
    ));
    assert_eq!(
        tree.dump(),
        "\
| <!DOCTYPE html>
| <html>
|   <head>
|   <body>
"
    );
}

#[test]
fn test_implied_html_head_and_body() {
    assert_eq!(
        dump("Hello World"),
        "\
| <html>
|   <head>
|   <body>
|     \"Hello World\"
"
    );
}

#[test]
fn test_whitespace_before_html_is_dropped() {
    let tree = parse("  \n<p>x");
    let body = tree.body().expect("body");
    assert_eq!(tree.text_content(body), "x");
}

#[test]
fn test_comments_outside_and_inside_html() {
    assert_eq!(
        dump("<!--a--><html><body><!--b--></body></html><!--c-->"),
        "\
| <!-- a -->
| <html>
|   <head>
|   <body>
|     <!-- b -->
| <!-- c -->
"
    );
}

#[test]
fn test_element_attributes() {
    let tree = parse(r#"<div id="main" class="container wide"></div>"#);
    let div = tree.find_element(NodeId::ROOT, "div").expect("div");
    let data = tree.as_element(div).expect("element");
    assert_eq!(data.id(), Some("main"));
    assert_eq!(data.classes(), ["container", "wide"]);
}

#[test]
fn test_void_elements_have_no_children() {
    assert_eq!(
        dump(r#"<input type="text"><br>after"#),
        "\
| <html>
|   <head>
|   <body>
|     <input>
|       type=\"text\"
|     <br>
|     \"after\"
"
    );
}

#[test]
fn test_head_elements() {
    assert_eq!(
        dump(r#"<meta charset="UTF-8"><title>My &amp; <b>Page</b></title><style>p > a {}</style>"#),
        "\
| <html>
|   <head>
|     <meta>
|       charset=\"UTF-8\"
|     <title>
|       \"My & <b>Page</b>\"
|     <style>
|       \"p > a {}\"
|   <body>
"
    );
}

#[test]
fn test_metadata_after_head_goes_back_into_head() {
    assert_eq!(
        dump("<head></head><link rel=x><p>y"),
        "\
| <html>
|   <head>
|     <link>
|       rel=\"x\"
|   <body>
|     <p>
|       \"y\"
"
    );
}

#[test]
fn test_text_after_body_end_tag_stays_in_body() {
    let tree = parse("<body>a</body>b</html>c");
    let body = tree.body().expect("body");
    assert_eq!(tree.children(body).len(), 1);
    assert_eq!(tree.text_content(body), "abc");
}

#[test]
fn test_pre_drops_leading_newline() {
    let tree = parse("<pre>\nx\n</pre>");
    let pre = tree.find_element(NodeId::ROOT, "pre").expect("pre");
    assert_eq!(tree.text_content(pre), "x\n");
}

#[test]
fn test_body_attributes_are_merged() {
    let tree = parse("<body a=1><body b=2 a=3>");
    let body = tree.body().expect("body");
    let attrs = &tree.as_element(body).expect("element").attrs;
    assert_eq!(attrs.get("a"), Some("1"));
    assert_eq!(attrs.get("b"), Some("2"));
}

#[test]
fn test_image_becomes_img() {
    let tree = parse("<image src=x>");
    assert!(tree.find_element(NodeId::ROOT, "img").is_some());
    assert!(tree.find_element(NodeId::ROOT, "image").is_none());
}

// ========== Implied end tags and scopes ==========

#[test]
fn test_generate_implied_end_tags() {
    assert_eq!(
        dump("<p>One<p>Two"),
        "\
| <html>
|   <head>
|   <body>
|     <p>
|       \"One\"
|     <p>
|       \"Two\"
"
    );
}

#[test]
fn test_stray_p_end_tag_creates_empty_paragraph() {
    assert_eq!(
        dump("</p>text"),
        "\
| <html>
|   <head>
|   <body>
|     <p>
|     \"text\"
"
    );
}

#[test]
fn test_li_implicit_close() {
    let tree = parse("<ul><li>A<li>B</ul>");
    let ul = tree.find_element(NodeId::ROOT, "ul").expect("ul");
    let items = element_children(&tree, ul, "li");
    assert_eq!(items.len(), 2);
    assert_eq!(tree.text_content(items[0]), "A");
    assert_eq!(tree.text_content(items[1]), "B");
}

#[test]
fn test_dd_dt_implicit_close() {
    let tree = parse("<dl><dt>T<dd>D1<dd>D2<dt>T2</dl>");
    let dl = tree.find_element(NodeId::ROOT, "dl").expect("dl");
    assert_eq!(tree.children(dl).len(), 4);
    assert_eq!(element_children(&tree, dl, "dd").len(), 2);
    assert_eq!(element_children(&tree, dl, "dt").len(), 2);
}

#[test]
fn test_nested_lists() {
    let tree = parse("<ul><li>A<ul><li>B</li></ul></li></ul>");
    let outer = tree.find_element(NodeId::ROOT, "ul").expect("ul");
    let outer_items = element_children(&tree, outer, "li");
    assert_eq!(outer_items.len(), 1);
    let inner = element_children(&tree, outer_items[0], "ul");
    assert_eq!(inner.len(), 1);
    assert_eq!(element_children(&tree, inner[0], "li").len(), 1);
}

#[test]
fn test_any_other_end_tag_stops_at_special() {
    let tree = parse("<span><div>text</span></div>");
    let span = tree.find_element(NodeId::ROOT, "span").expect("span");
    let div = tree.find_element(span, "div").expect("div inside span");
    assert_eq!(tree.text_content(div), "text");
}

// ========== Formatting elements ==========

#[test]
fn test_adoption_agency_simple_misnesting() {
    assert_eq!(
        dump("<b>1<p>2</b>3</p>"),
        "\
| <html>
|   <head>
|   <body>
|     <b>
|       \"1\"
|     <p>
|       <b>
|         \"2\"
|       \"3\"
"
    );
}

#[test]
fn test_adoption_agency_no_furthest_block() {
    assert_eq!(
        dump("<b>1<i>2</b>3</i>"),
        "\
| <html>
|   <head>
|   <body>
|     <b>
|       \"1\"
|       <i>
|         \"2\"
|     <i>
|       \"3\"
"
    );
}

#[test]
fn test_formatting_reconstruction_across_blocks() {
    assert_eq!(
        dump("<p><b>x<p>y"),
        "\
| <html>
|   <head>
|   <body>
|     <p>
|       <b>
|         \"x\"
|     <p>
|       <b>
|         \"y\"
"
    );
}

#[test]
fn test_nested_anchor_tags() {
    assert_eq!(
        dump(r#"<a href="1">first<a href="2">second"#),
        "\
| <html>
|   <head>
|   <body>
|     <a>
|       href=\"1\"
|       \"first\"
|     <a>
|       href=\"2\"
|       \"second\"
"
    );
}

#[test]
fn test_noahs_ark_limits_identical_formatting_elements() {
    let tree = parse("<p><b><b><b><b>x</p><p>y");
    let paragraphs = element_children(&tree, tree.body().expect("body"), "p");
    assert_eq!(paragraphs.len(), 2);
    // Only three identical entries survive in the active formatting list.
    let mut depth = 0;
    let mut node = paragraphs[1];
    while let Some(&child) = element_children(&tree, node, "b").first() {
        depth += 1;
        node = child;
    }
    assert_eq!(depth, 3);
}

// ========== Tables ==========

#[test]
fn test_table_gets_implied_tbody() {
    assert_eq!(
        dump("<table><tr><td>a<td>b</table>"),
        "\
| <html>
|   <head>
|   <body>
|     <table>
|       <tbody>
|         <tr>
|           <td>
|             \"a\"
|           <td>
|             \"b\"
"
    );
}

#[test]
fn test_foster_parenting_of_text_and_elements() {
    assert_eq!(
        dump("<table>text<b>bold</b><tr><td>cell</table>"),
        "\
| <html>
|   <head>
|   <body>
|     \"text\"
|     <b>
|       \"bold\"
|     <table>
|       <tbody>
|         <tr>
|           <td>
|             \"cell\"
"
    );
}

#[test]
fn test_whitespace_in_table_stays_in_table() {
    let tree = parse("<table> <tr><td>x</td></tr> </table>");
    let table = tree.find_element(NodeId::ROOT, "table").expect("table");
    assert_eq!(tree.as_text(tree.children(table)[0]), Some(" "));
    let body = tree.body().expect("body");
    assert_eq!(tree.children(body).len(), 1);
}

#[test]
fn test_hidden_input_in_table() {
    let tree = parse("<table><input type=hidden><input></table>");
    let table = tree.find_element(NodeId::ROOT, "table").expect("table");
    assert_eq!(element_children(&tree, table, "input").len(), 1);
    let body = tree.body().expect("body");
    assert_eq!(element_children(&tree, body, "input").len(), 1);
}

#[test]
fn test_caption_and_colgroup() {
    assert_eq!(
        dump("<table><caption>c<col><tr><td>x"),
        "\
| <html>
|   <head>
|   <body>
|     <table>
|       <caption>
|         \"c\"
|       <colgroup>
|         <col>
|       <tbody>
|         <tr>
|           <td>
|             \"x\"
"
    );
}

// ========== Select ==========

#[test]
fn test_select_options() {
    assert_eq!(
        dump("<select><option>a<option>b<optgroup><option>c</select>after"),
        "\
| <html>
|   <head>
|   <body>
|     <select>
|       <option>
|         \"a\"
|       <option>
|         \"b\"
|       <optgroup>
|         <option>
|           \"c\"
|     \"after\"
"
    );
}

#[test]
fn test_select_closed_by_table_tag_in_table() {
    let tree = parse("<table><tr><td><select><option>x<td>y</table>");
    let tr = tree.find_element(NodeId::ROOT, "tr").expect("tr");
    assert_eq!(element_children(&tree, tr, "td").len(), 2);
}

// ========== Templates ==========

#[test]
fn test_template_contents() {
    assert_eq!(
        dump("<template><td>x</td></template>"),
        "\
| <html>
|   <head>
|     <template>
|       content
|         <td>
|           \"x\"
|   <body>
"
    );
}

#[test]
fn test_whitespace_after_ignored_character_in_column_group() {
    assert_eq!(
        dump("<template><col>&\n</template>"),
        "\
| <html>
|   <head>
|     <template>
|       content
|         <col>
|         \"
\"
|   <body>
"
    );
}

// ========== Foreign content ==========

#[test]
fn test_svg_and_mathml() {
    assert_eq!(
        dump(r#"<svg viewbox="0 0 1 1"><foreignobject><p>x</p></foreignobject></svg><math><mi>y</mi></math>"#),
        "\
| <html>
|   <head>
|   <body>
|     <svg svg>
|       viewBox=\"0 0 1 1\"
|       <svg foreignObject>
|         <p>
|           \"x\"
|     <math math>
|       <math mi>
|         \"y\"
"
    );
}

#[test]
fn test_html_breakout_from_svg() {
    let tree = parse("<svg><g><div>out</div>");
    let body = tree.body().expect("body");
    assert_eq!(element_children(&tree, body, "div").len(), 1);
}

#[test]
fn test_cdata_in_svg() {
    let tree = parse("<svg><![CDATA[a<b]]></svg>");
    let svg = tree.find_element(NodeId::ROOT, "svg").expect("svg");
    assert_eq!(tree.text_content(svg), "a<b");
}

// ========== Framesets ==========

#[test]
fn test_frameset() {
    assert_eq!(
        dump("<frameset><frame></frameset>"),
        "\
| <html>
|   <head>
|   <frameset>
|     <frame>
"
    );
}

#[test]
fn test_whitespace_after_ignored_character_after_frameset() {
    assert_eq!(
        dump("<frameset></frameset></html>x "),
        "\
| <html>
|   <head>
|   <frameset>
|   \" \"
"
    );
}

// ========== Quirks ==========

#[test]
fn test_quirks_mode_from_doctype() {
    assert_eq!(parse("<p>x").quirks_mode(), QuirksMode::Quirks);
    assert_eq!(parse("<!DOCTYPE html>").quirks_mode(), QuirksMode::NoQuirks);
    assert_eq!(
        parse(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#).quirks_mode(),
        QuirksMode::Quirks
    );
    assert_eq!(
        parse(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#)
            .quirks_mode(),
        QuirksMode::LimitedQuirks
    );
}

#[test]
fn test_table_inside_p_depends_on_quirks() {
    let quirks = parse("<p><table></table>");
    let p = quirks.find_element(NodeId::ROOT, "p").expect("p");
    assert!(quirks.find_element(p, "table").is_some());

    let standard = parse("<!DOCTYPE html><p><table></table>");
    let p = standard.find_element(NodeId::ROOT, "p").expect("p");
    assert!(standard.find_element(p, "table").is_none());
}

// ========== Errors ==========

#[test]
fn test_errors_are_reported_but_not_fatal() {
    let (tree, issues) = parse_document("<div><span>unterminated");
    assert!(!issues.is_empty());
    let span = tree.find_element(NodeId::ROOT, "span").expect("span");
    assert_eq!(tree.text_content(span), "unterminated");
}

#[test]
fn test_conforming_document_has_no_errors() {
    let (_, issues) =
        parse_document("<!DOCTYPE html><html><head><title>t</title></head><body><p>x</p></body></html>");
    assert!(issues.is_empty(), "{issues:?}");
}
