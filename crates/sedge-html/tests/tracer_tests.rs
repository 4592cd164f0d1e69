//! Tests for the logging decorators.

use sedge_common::warning::warn_once;
use sedge_dom::NodeId;
use sedge_html::{
    Dispatcher, DomBuilder, HTMLTokenizer, TokenCollector, TokenSinkTracer, TreeBuilder,
    TreeBuilderOptions, TreeHandler, TreeHandlerTracer,
};

fn trace_tree(input: &str) -> (DomBuilder, String) {
    let handler = TreeHandlerTracer::new(DomBuilder::new());
    let builder = TreeBuilder::new(handler, TreeBuilderOptions::default());
    let mut tokenizer = HTMLTokenizer::new(input, Dispatcher::new(builder));
    tokenizer.run();
    tokenizer.into_sink().into_handler().into_parts()
}

#[test]
fn test_tree_tracer_logs_every_call_in_order() {
    let (_, log) = trace_tree("<!DOCTYPE html><p class=x>hi<br></p>");
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.first(), Some(&"start_document"));
    assert_eq!(lines.last(), Some(&"end_document @36"));
    assert!(lines.contains(&"doctype \"html\" public=None system=None no-quirks @0+15"));
    assert!(lines.contains(&"insert_element under #2 <p#3> @15+11"));
    assert!(lines.contains(&"characters under #3 \"hi\" @26+2"));
    assert!(lines.contains(&"insert_element under #3 <br#4> void @28+4"));
    assert!(lines.contains(&"end_tag <p#3> @32+4"));
}

#[test]
fn test_tree_tracer_forwards_to_inner_handler() {
    let (dom, log) = trace_tree("<b>1<p>2</b>3");
    assert!(log.contains("reparent_children <p#4> -> <b#5>"), "{log}");
    assert_eq!(
        dom.tree().dump(),
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
fn test_tree_tracer_logs_errors() {
    let (dom, log) = trace_tree("<p>x");
    assert!(!dom.issues().is_empty());
    for issue in dom.issues() {
        assert!(log.contains(&format!("error {} @{}", issue.message, issue.position)));
    }
}

#[test]
fn test_token_tracer_logs_tokens_and_switches() {
    let mut tokenizer = HTMLTokenizer::new(
        "<title>a</title>",
        TokenSinkTracer::new(TokenCollector::new()),
    );
    tokenizer.run();
    let (collector, log) = tokenizer.into_sink().into_parts();
    assert_eq!(collector.tokens().len(), 4);
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 5, "{log}");
    assert!(lines[1].starts_with("  switch to "), "{log}");
    assert!(lines[1].ends_with(" until </title>"), "{log}");
}

#[test]
fn test_token_tracer_in_front_of_the_dispatcher() {
    let builder = TreeBuilder::new(DomBuilder::new(), TreeBuilderOptions::default());
    let sink = TokenSinkTracer::new(Dispatcher::new(builder));
    let mut tokenizer = HTMLTokenizer::new("<svg><![CDATA[x]]></svg>", sink);
    tokenizer.run();
    let (dispatcher, log) = tokenizer.into_sink().into_parts();
    // CDATA is only recognized because the tracer forwards `allows_cdata`.
    assert!(!log.contains("error"), "{log}");
    let dom = dispatcher.into_handler();
    let svg = dom.tree().find_element(NodeId::ROOT, "svg").expect("svg");
    assert_eq!(dom.tree().text_content(svg), "x");
}

#[test]
fn test_echo_does_not_use_the_warning_set() {
    let mut tracer = TreeHandlerTracer::new(DomBuilder::new()).with_echo();
    tracer.error("echoed-twice", 7);
    tracer.error("echoed-twice", 7);
    let (_, log) = tracer.into_parts();
    assert_eq!(log, "error echoed-twice @7\nerror echoed-twice @7\n");
    // Echoed lines never claim a slot in the deduplicated warnings.
    assert!(warn_once("TreeHandler", "error echoed-twice @7"));
}

#[test]
fn test_echoing_tracer_logs_a_second_parse_in_full() {
    let trace = || {
        let handler = TreeHandlerTracer::new(DomBuilder::new()).with_echo();
        let builder = TreeBuilder::new(handler, TreeBuilderOptions::default());
        let mut tokenizer = HTMLTokenizer::new("<p>x", Dispatcher::new(builder));
        tokenizer.run();
        tokenizer.into_sink().into_handler().into_parts().1
    };
    let first = trace();
    assert!(first.contains("error "), "{first}");
    assert_eq!(trace(), first);
}
