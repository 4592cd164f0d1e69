//! Sedge CLI
//!
//! Parse a file or an inline string and print what the parser made of it:
//! the html5lib-style tree dump, serialized markup, the token stream, the
//! tree handler call trace, or JSON.

use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use sedge_common::warning::{clear_warnings, warn_once};
use sedge_html::{
    Dispatcher, DomBuilder, HTMLTokenizer, ParseIssue, ParseOptions, Serializer, TokenCollector,
    TokenSinkTracer, TokenizerState, TreeBuilder, TreeHandlerTracer, parse_into,
};

/// Sedge: inspect how an HTML document is tokenized and tree-built
#[derive(Parser, Debug)]
#[command(name = "sedge")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the DOM as an html5lib tree dump
    sedge page.html

    # Parse inline HTML and serialize it back
    sedge --html '<p>a<b>b</p>c' -o serialize

    # Parse a fragment in a <tr> context
    sedge --html '<td>1<td>2' --fragment tr

    # Show every tree handler call
    sedge --html '<table>x<tr><td>y' -o trace
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<String>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Output::Dump)]
    output: Output,

    /// Parse as a fragment in this context element
    #[arg(short, long, value_name = "NAME")]
    fragment: Option<String>,

    /// Namespace of the fragment context: html, svg, math, or a URL
    #[arg(long, value_name = "NS", requires = "fragment")]
    namespace: Option<String>,

    /// Start the tokenizer in this state (Data, RCDATA, RAWTEXT, ScriptData, PLAINTEXT)
    #[arg(long, value_name = "STATE")]
    initial_state: Option<TokenizerState>,

    /// Tag name that ends the initial text state
    #[arg(long, value_name = "TAG", requires = "initial_state")]
    end_tag: Option<String>,

    /// Parse with the scripting flag disabled
    #[arg(long)]
    no_scripting: bool,

    /// Do not report parse errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    /// html5lib-style tree dump
    Dump,
    /// Serialized markup
    Serialize,
    /// The token stream with spans, without tree construction
    Tokens,
    /// One line per token and per tree handler call
    Trace,
    /// The tree and parse issues as JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let html = load_input(&cli)?;
    let options = parse_options(&cli);
    clear_warnings();

    let issues = match cli.output {
        Output::Tokens => print_tokens(&html, &options)?,
        Output::Trace => print_trace(&html, &options)?,
        Output::Serialize => {
            let serializer = Serializer::new().with_scripting(options.scripting);
            let (markup, issues) = parse_into(&html, serializer, &options)?.finish();
            println!("{markup}");
            issues
        }
        Output::Dump | Output::Json => {
            let builder = parse_into(&html, DomBuilder::new(), &options)?;
            let (tree, root, issues) = builder.into_parts();
            if cli.output == Output::Json {
                let json = serde_json::json!({
                    "quirksMode": tree.quirks_mode(),
                    "root": tree.node_ref(root),
                    "issues": issues,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                print!("{}", tree.dump_children(root));
            }
            issues
        }
    };

    report(&issues);
    Ok(())
}

/// Load document from CLI arguments
fn load_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("reading '{path}'"))
    } else {
        anyhow::bail!("no input: pass a file path or --html")
    }
}

fn parse_options(cli: &Cli) -> ParseOptions {
    ParseOptions {
        fragment_namespace: cli.namespace.clone(),
        fragment_name: cli.fragment.clone(),
        initial_state: cli.initial_state,
        appropriate_end_tag: cli.end_tag.clone(),
        ignore_errors: cli.quiet,
        scripting: !cli.no_scripting,
        ..ParseOptions::default()
    }
}

/// Tokenize only. The collector applies its own text-state switches.
fn print_tokens(html: &str, options: &ParseOptions) -> Result<Vec<ParseIssue>> {
    let context = options.validate()?;
    let mut tokenizer = HTMLTokenizer::with_options(
        html,
        TokenCollector::new(),
        options.tokenizer_options(context.as_ref()),
    )?;
    tokenizer.run();
    let collector = tokenizer.into_sink();

    println!("=== HTML Tokens ({}) ===", collector.tokens().len());
    for (i, (token, span)) in collector.tokens().iter().enumerate() {
        println!("  {i:3}: {token}  {}", format!("@{span}").dimmed());
    }
    Ok(collector
        .errors()
        .iter()
        .map(|(error, position)| ParseIssue {
            message: error.to_string(),
            position: *position,
        })
        .collect())
}

/// Full parse with both seams traced.
fn print_trace(html: &str, options: &ParseOptions) -> Result<Vec<ParseIssue>> {
    let context = options.validate()?;
    let handler = TreeHandlerTracer::new(DomBuilder::new());
    let builder = match &context {
        Some(context) => TreeBuilder::new_fragment(handler, options.tree_builder_options(), context),
        None => TreeBuilder::new(handler, options.tree_builder_options()),
    };
    let mut tokenizer = HTMLTokenizer::with_options(
        html,
        TokenSinkTracer::new(Dispatcher::new(builder)),
        options.tokenizer_options(context.as_ref()),
    )?;
    tokenizer.run();
    let (dispatcher, token_log) = tokenizer.into_sink().into_parts();
    let (dom, handler_log) = dispatcher.into_handler().into_parts();

    println!("=== Tokens ===");
    print!("{token_log}");
    println!("\n=== Tree Handler Calls ===");
    print!("{handler_log}");
    let (_, _, issues) = dom.into_parts();
    Ok(issues)
}

fn report(issues: &[ParseIssue]) {
    if issues.is_empty() {
        return;
    }
    eprintln!("\n{}", format!("{} parse issue(s)", issues.len()).bold());
    for issue in issues {
        let _ = warn_once("HTML", &issue.to_string());
    }
}
