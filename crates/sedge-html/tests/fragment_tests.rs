//! Tests for fragment parsing and parser option validation.

use sedge_common::error::OptionsError;
use sedge_dom::{Namespace, QuirksMode};
use sedge_html::{
    DomBuilder, FragmentContext, ParseOptions, TokenizerState, parse_fragment, parse_into,
};

fn fragment_dump(input: &str, context: &FragmentContext) -> String {
    let (tree, root, _) = parse_fragment(input, context).expect("valid context");
    tree.dump_children(root)
}

#[test]
fn test_table_cells_in_row_context() {
    let (tree, root, issues) =
        parse_fragment("<td>1</td><td>2</td>", &FragmentContext::html("tr")).expect("valid context");
    let cells = tree.children(root);
    assert_eq!(cells.len(), 2);
    for (cell, text) in cells.iter().zip(["1", "2"]) {
        assert_eq!(tree.as_element(*cell).map(|e| e.tag_name.as_str()), Some("td"));
        assert_eq!(tree.text_content(*cell), text);
    }
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn test_body_context() {
    assert_eq!(
        fragment_dump("<p>a<b>b</p>c", &FragmentContext::html("body")),
        "\
| <p>
|   \"a\"
|   <b>
|     \"b\"
| <b>
|   \"c\"
"
    );
}

#[test]
fn test_rows_in_table_context_get_tbody() {
    assert_eq!(
        fragment_dump("<tr><td>x", &FragmentContext::html("table")),
        "\
| <tbody>
|   <tr>
|     <td>
|       \"x\"
"
    );
}

#[test]
fn test_text_context_elements_use_their_tokenizer_state() {
    assert_eq!(
        fragment_dump("<b>&amp;</b>", &FragmentContext::html("title")),
        "| \"<b>&</b>\"\n"
    );
    assert_eq!(
        fragment_dump("<b>&amp;</b>", &FragmentContext::html("style")),
        "| \"<b>&amp;</b>\"\n"
    );
    assert_eq!(
        fragment_dump("a</script>b", &FragmentContext::html("script")),
        "| \"ab\"\n"
    );
}

#[test]
fn test_noscript_context_follows_scripting_flag() {
    let scripted = parse_into(
        "<p>x",
        DomBuilder::new(),
        &ParseOptions::fragment("noscript"),
    )
    .expect("valid options");
    assert_eq!(
        scripted.tree().dump_children(scripted.root()),
        "| \"<p>x\"\n"
    );

    let unscripted = parse_into(
        "<p>x",
        DomBuilder::new(),
        &ParseOptions::fragment("noscript").with_scripting(false),
    )
    .expect("valid options");
    assert_eq!(
        unscripted.tree().dump_children(unscripted.root()),
        "| <p>\n|   \"x\"\n"
    );
}

#[test]
fn test_foreign_context() {
    let context = FragmentContext {
        name: "svg".to_string(),
        namespace: Namespace::Svg,
    };
    assert_eq!(
        fragment_dump("<circle r=1/><foreignobject>x</foreignobject>", &context),
        "\
| <svg circle>
|   r=\"1\"
| <svg foreignObject>
|   \"x\"
"
    );
}

#[test]
fn test_template_context() {
    assert_eq!(
        fragment_dump("<td>x</td>", &FragmentContext::html("template")),
        "| <td>\n|   \"x\"\n"
    );
}

#[test]
fn test_fragments_are_not_in_quirks_mode() {
    let (tree, _, _) = parse_fragment("<p>x", &FragmentContext::html("div")).expect("valid context");
    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);
}

#[test]
fn test_fragment_name_is_lowercased_for_html() {
    let context = ParseOptions::fragment("TR").validate().expect("valid options");
    assert_eq!(context, Some(FragmentContext::html("tr")));
}

#[test]
fn test_namespace_by_name_or_url() {
    for namespace in ["svg", "http://www.w3.org/2000/svg"] {
        let context = ParseOptions::fragment("foreignObject")
            .with_fragment_namespace(namespace)
            .validate()
            .expect("valid options")
            .expect("fragment context");
        assert_eq!(context.namespace, Namespace::Svg);
        assert_eq!(context.name, "foreignObject");
    }
}

#[test]
fn test_namespace_without_name_is_rejected() {
    let options = ParseOptions {
        fragment_namespace: Some("html".to_string()),
        ..ParseOptions::default()
    };
    assert_eq!(options.validate(), Err(OptionsError::MissingFragmentName));
    assert!(parse_into("x", DomBuilder::new(), &options).is_err());
}

#[test]
fn test_unknown_namespace_is_rejected() {
    let options = ParseOptions::fragment("x").with_fragment_namespace("xml");
    assert_eq!(
        options.validate(),
        Err(OptionsError::UnknownNamespace("xml".to_string()))
    );
}

#[test]
fn test_non_text_initial_state_is_rejected() {
    let options = ParseOptions {
        initial_state: Some(TokenizerState::TagOpen),
        ..ParseOptions::default()
    };
    assert!(matches!(
        options.validate(),
        Err(OptionsError::UnsupportedInitialState(_))
    ));
}

#[test]
fn test_explicit_initial_state_wins_over_context() {
    let options = ParseOptions {
        initial_state: Some(TokenizerState::PLAINTEXT),
        ..ParseOptions::fragment("div")
    };
    let builder = parse_into("<b>x</b>", DomBuilder::new(), &options).expect("valid options");
    assert_eq!(
        builder.tree().dump_children(builder.root()),
        "| \"<b>x</b>\"\n"
    );
}
