//! Tests for the tree handler contract: every call sequence the tree builder
//! produces must be balanced, deterministic and positioned in the input.

use std::collections::{HashMap, HashSet};

use sedge_html::tokenizer::TokenizerError;
use sedge_html::{
    Attributes, Dispatcher, DomBuilder, Element, ElementId, FragmentContext, HTMLTokenizer,
    Preposition, QuirksMode, SinkResult, SourceSpan, Token, TokenSink, TreeBuilder,
    TreeBuilderOptions, TreeHandler, TreeHandlerTracer,
};

/// A handler that checks each call against what it has seen so far.
#[derive(Debug, Default)]
struct Recorder {
    input: String,
    calls: Vec<String>,
    known: HashSet<ElementId>,
    voids: HashSet<ElementId>,
    ended: HashMap<ElementId, usize>,
    open: usize,
    doctype_quirks: Option<QuirksMode>,
    reparents: usize,
    errors: Vec<(String, usize)>,
    violations: Vec<String>,
}

impl Recorder {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            ..Self::default()
        }
    }

    fn check_target(&mut self, at: Preposition) {
        if let Preposition::Before(id) | Preposition::Under(id) = at
            && !self.known.contains(&id)
        {
            self.violations.push(format!("unknown target {at}"));
        }
    }

    fn check_span(&mut self, span: SourceSpan) {
        if span.end() > self.input.len() {
            self.violations.push(format!("span {span} out of bounds"));
        }
    }

    fn introduce(&mut self, element: &Element) {
        if self.known.insert(element.id) {
            self.open += 1;
        }
    }
}

impl TreeHandler for Recorder {
    fn start_document(&mut self, _fragment: Option<&FragmentContext>) {
        self.calls.push("start_document".to_string());
    }

    fn end_document(&mut self, _pos: usize) {
        self.calls.push("end_document".to_string());
    }

    fn characters(&mut self, at: Preposition, text: &str, span: SourceSpan) {
        self.check_target(at);
        self.check_span(span);
        self.calls.push(format!("characters {at} {text:?}"));
    }

    fn insert_element(&mut self, at: Preposition, element: &Element, is_void: bool, span: SourceSpan) {
        self.check_target(at);
        self.check_span(span);
        if is_void != element.is_void() {
            self.violations.push(format!("void flag wrong for {element}"));
        }
        if self.ended.contains_key(&element.id) {
            self.violations.push(format!("{element} inserted after its end tag"));
        }
        if is_void {
            let _ = self.voids.insert(element.id);
            let _ = self.known.insert(element.id);
        } else {
            self.introduce(element);
        }
        self.calls.push(format!("insert_element {at} {element}"));
    }

    fn end_tag(&mut self, element: &Element, span: SourceSpan) {
        self.check_span(span);
        if self.voids.contains(&element.id) {
            self.violations.push(format!("end tag for void {element}"));
        }
        if !self.known.contains(&element.id) {
            self.violations.push(format!("end tag for unknown {element}"));
        }
        let count = self.ended.entry(element.id).or_default();
        *count += 1;
        if *count > 1 {
            self.violations.push(format!("second end tag for {element}"));
        }
        self.open = self.open.saturating_sub(1);
        if span.len > 0 {
            let markup = self.input[span.start..span.end()].to_ascii_lowercase();
            if !markup.starts_with(&format!("</{}", element.name.to_ascii_lowercase())) {
                self.violations
                    .push(format!("end tag span {markup:?} does not close {element}"));
            }
        }
        self.calls.push(format!("end_tag {element}"));
    }

    fn doctype(
        &mut self,
        name: &str,
        _public_id: Option<&str>,
        _system_id: Option<&str>,
        quirks: QuirksMode,
        span: SourceSpan,
    ) {
        self.check_span(span);
        self.doctype_quirks = Some(quirks);
        self.calls.push(format!("doctype {name}"));
    }

    fn comment(&mut self, at: Preposition, text: &str, span: SourceSpan) {
        self.check_target(at);
        self.check_span(span);
        self.calls.push(format!("comment {at} {text:?}"));
    }

    fn error(&mut self, text: &str, pos: usize) {
        if pos > self.input.len() {
            self.violations.push(format!("error {text} out of bounds"));
        }
        self.errors.push((text.to_string(), pos));
    }

    fn merge_attributes(&mut self, element: &Element, _attrs: &Attributes, _pos: usize) {
        if !self.known.contains(&element.id) {
            self.violations.push(format!("merge into unknown {element}"));
        }
        self.calls.push(format!("merge_attributes {element}"));
    }

    fn remove_node(&mut self, element: &Element, _pos: usize) {
        self.calls.push(format!("remove_node {element}"));
    }

    fn reparent_children(&mut self, element: &Element, new_parent: &Element, _pos: usize) {
        if !self.known.contains(&element.id) {
            self.violations.push(format!("reparent from unknown {element}"));
        }
        if self.known.contains(&new_parent.id) {
            self.violations.push(format!("reparent into existing {new_parent}"));
        }
        self.introduce(new_parent);
        self.reparents += 1;
        self.calls.push(format!("reparent_children {element} -> {new_parent}"));
    }
}

/// Runs the dispatcher and checks, between tokens, that the elements the
/// handler considers open are exactly the tree builder's stack.
struct Checked {
    dispatcher: Dispatcher<Recorder>,
    fragment: bool,
    max_reparents_per_token: usize,
}

impl TokenSink for Checked {
    fn process_token(&mut self, token: Token, span: SourceSpan) -> SinkResult {
        let before = self.dispatcher.builder().handler().reparents;
        let result = self.dispatcher.process_token(token, span);
        let builder = self.dispatcher.builder();
        let handler = builder.handler();
        self.max_reparents_per_token = self
            .max_reparents_per_token
            .max(handler.reparents - before);
        if !builder.is_stopped() {
            let depth = builder.stack_depth() - usize::from(self.fragment);
            assert_eq!(handler.open, depth, "open elements after {span}");
        }
        result
    }

    fn parse_error(&mut self, error: TokenizerError, pos: usize) {
        self.dispatcher.parse_error(error, pos);
    }

    fn allows_cdata(&self) -> bool {
        self.dispatcher.allows_cdata()
    }
}

fn run(input: &str, fragment: Option<&FragmentContext>) -> (Recorder, usize) {
    let handler = Recorder::new(input);
    let options = TreeBuilderOptions::default();
    let builder = match fragment {
        Some(context) => TreeBuilder::new_fragment(handler, options, context),
        None => TreeBuilder::new(handler, options),
    };
    let sink = Checked {
        dispatcher: Dispatcher::new(builder),
        fragment: fragment.is_some(),
        max_reparents_per_token: 0,
    };
    let mut tokenizer = HTMLTokenizer::new(input, sink);
    tokenizer.run();
    let sink = tokenizer.into_sink();
    let max = sink.max_reparents_per_token;
    (sink.dispatcher.into_handler(), max)
}

fn record(input: &str) -> Recorder {
    run(input, None).0
}

/// The full contract, checked once the parse has ended.
fn assert_contract(recorder: &Recorder) {
    assert!(recorder.violations.is_empty(), "{:#?}", recorder.violations);
    assert_eq!(recorder.calls.first().map(String::as_str), Some("start_document"));
    assert_eq!(recorder.calls.last().map(String::as_str), Some("end_document"));
    assert_eq!(
        recorder.calls.iter().filter(|c| c.starts_with("start_document")).count(),
        1
    );
    assert_eq!(
        recorder.calls.iter().filter(|c| c.starts_with("end_document")).count(),
        1
    );
    assert_eq!(recorder.open, 0, "every element is closed at the end");
    for id in &recorder.known {
        if !recorder.voids.contains(id) {
            assert_eq!(recorder.ended.get(id), Some(&1), "element {id}");
        }
    }
}

const SAMPLES: &[&str] = &[
    "",
    "<!DOCTYPE html><html><head><title>t</title></head><body><p>x</p></body></html>",
    "<p>One<p>Two<br><img src=a>",
    "<b>1<p>2</b>3</p>",
    "<a href=1>first<a href=2>second</a>",
    "<table>text<tr><td>cell</table>",
    "<table><caption>c<col><tr><td>a<td>b<select><option>x<td>y</table>",
    "<head></head><link rel=x><style>s</style><p>y",
    "<template><td>x</td><tr><td>y</template><p>z",
    "<svg viewBox='0 0 1 1'><foreignObject><p>x</p></foreignObject><![CDATA[c]]></svg><math><mi>y",
    "<frameset><frame><noframes>n</noframes></frameset><!--c-->",
    "<ul><li>A<li>B<dl><dt>T<dd>D</ul>",
    "<body a=1><body b=2><div><span>unterminated",
    "<p><b><b><b><b>x</p><p>y",
    "</br></p><image><isindex><textarea>\nt</textarea>",
    "<form><form><input></form><button><button>",
];

#[test]
fn test_contract_holds_for_samples() {
    for input in SAMPLES {
        let recorder = record(input);
        assert_contract(&recorder);
    }
}

#[test]
fn test_contract_holds_for_fragments() {
    let cases = [
        ("tr", "<td>1</td><td>2</td>"),
        ("table", "<tr><td>x</table><p>"),
        ("select", "<option>a<optgroup>b</select>"),
        ("template", "<td>x</td><col>"),
        ("title", "<b>raw</b>"),
        ("div", "<b>1<p>2</b>3"),
    ];
    for (context, input) in cases {
        let (recorder, _) = run(input, Some(&FragmentContext::html(context)));
        assert_contract(&recorder);
    }
}

#[test]
fn test_calls_are_deterministic() {
    for input in SAMPLES {
        let first = record(input).calls;
        let second = record(input).calls;
        assert_eq!(first, second, "{input}");
    }
}

#[test]
fn test_void_elements_are_never_closed() {
    let recorder = record("<p>a<br>b<img><hr><input></p>");
    assert_contract(&recorder);
    assert_eq!(recorder.voids.len(), 4);
}

#[test]
fn test_end_tag_spans_point_at_the_closing_markup() {
    let input = "<div><p>x</p></DIV>";
    let builder = TreeBuilder::new(
        TreeHandlerTracer::new(DomBuilder::new()),
        TreeBuilderOptions::default(),
    );
    let mut tokenizer = HTMLTokenizer::new(input, Dispatcher::new(builder));
    tokenizer.run();
    let (_, log) = tokenizer.into_sink().into_handler().into_parts();
    assert!(log.contains("end_tag <p#4> @9+4"), "{log}");
    assert!(log.contains("end_tag <div#3> @13+6"), "{log}");
    // Closed by end of file: empty span at the end of input.
    assert!(log.contains("end_tag <body#2> @19+0"), "{log}");
}

#[test]
fn test_adoption_agency_is_bounded() {
    let input = format!("<b>{}x</b>", "<div>".repeat(20));
    let (recorder, max) = run(&input, None);
    assert_contract(&recorder);
    assert!(max > 0);
    assert!(max <= 8, "{max} reparents for one token");
}

#[test]
fn test_foster_parented_text_goes_before_the_table() {
    let recorder = record("<table>text<tr><td>cell</table>");
    assert_contract(&recorder);
    let table = recorder
        .calls
        .iter()
        .find_map(|c| {
            c.strip_prefix("insert_element ")
                .filter(|rest| rest.contains("<table#"))
                .and_then(|rest| rest.split("<table").nth(1))
                .and_then(|rest| rest.strip_suffix('>'))
                .map(str::to_string)
        })
        .expect("table inserted");
    assert!(
        recorder
            .calls
            .contains(&format!("characters before {table} \"text\"")),
        "{:#?}",
        recorder.calls
    );
}

#[test]
fn test_errors_are_not_fatal() {
    let recorder = record("<div><span>unterminated");
    assert_contract(&recorder);
    assert!(!recorder.errors.is_empty());
    assert!(
        recorder
            .calls
            .iter()
            .any(|c| c == "characters under #4 \"unterminated\"")
    );
}

#[test]
fn test_ignore_errors_reports_nothing() {
    let input = "<div></span><table>x";
    let builder = TreeBuilder::new(
        Recorder::new(input),
        TreeBuilderOptions::default().with_ignore_errors(),
    );
    let mut tokenizer = HTMLTokenizer::new(input, Dispatcher::new(builder));
    tokenizer.run();
    let recorder = tokenizer.into_sink().into_handler();
    // Tokenizer errors still arrive; none come from tree construction.
    assert!(recorder.errors.is_empty(), "{:?}", recorder.errors);
}

#[test]
fn test_doctype_decides_quirks() {
    assert_eq!(record("<!DOCTYPE html>").doctype_quirks, Some(QuirksMode::NoQuirks));
    assert_eq!(record("<!DOCTYPE foo>").doctype_quirks, Some(QuirksMode::Quirks));
    assert_eq!(
        record(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "x">"#)
            .doctype_quirks,
        Some(QuirksMode::LimitedQuirks)
    );
    assert_eq!(record("<p>").doctype_quirks, None);
}

#[test]
fn test_body_attributes_are_merged_not_inserted() {
    let recorder = record("<body a=1><body b=2>");
    assert_contract(&recorder);
    assert_eq!(
        recorder
            .calls
            .iter()
            .filter(|c| c.starts_with("merge_attributes <body"))
            .count(),
        1
    );
}
