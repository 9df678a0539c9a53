//! Heron CLI
//!
//! Parse HTML from a file or the command line and print the resulting tree,
//! its serialization, or the raw token stream.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use heron_dom::dump::{dump_children, dump_document};
use heron_dom::serialize::serialize_children;
use heron_dom::{DomTree, Namespace, QualName};
use heron_html::tokenizer::{TokenCollector, TokenizerOptions};
use heron_html::{HtmlError, HtmlParser, ParseIssue, ParseStatus, ParserOptions, TokenizerState};
use owo_colors::OwoColorize;

/// Heron: a streaming HTML5 parser
#[derive(Parser, Debug)]
#[command(name = "heron")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree for a file
    heron ./index.html

    # Parse inline HTML
    heron --html '<table>X<tr><td>Y'

    # Serialize the body back to HTML
    heron --format html --html '<p>One<p>Two'

    # Parse as the contents of a <td>
    heron --fragment td --html '<b>bold'

    # Feed the input one UTF-16 code unit at a time
    heron --chunk-size 1 ./index.html

    # Print the token stream in html5lib JSON form
    heron --format tokens --initial-state 'RCDATA state' --last-start-tag title --html 'a</title>'
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// What to print
    #[arg(long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Feed the input in chunks of this many UTF-16 code units
    #[arg(long, value_name = "UNITS")]
    chunk_size: Option<usize>,

    /// Parse as a fragment inside an element with this tag name
    #[arg(long, value_name = "CONTEXT")]
    fragment: Option<String>,

    /// Parse with the scripting flag disabled
    #[arg(long)]
    no_scripting: bool,

    /// Print recovered parse errors after the output
    #[arg(long)]
    issues: bool,

    /// Tokenizer state to start in (tokens format only)
    #[arg(long, value_name = "STATE")]
    initial_state: Option<String>,

    /// Seed for the last start tag name (tokens format only)
    #[arg(long, value_name = "TAG")]
    last_start_tag: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented html5lib-style tree dump
    Tree,
    /// Serialized HTML
    Html,
    /// Token stream as JSON
    Tokens,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let input = load_input(&cli)?;

    if cli.format == Format::Tokens {
        return print_tokens(&cli, &input);
    }

    let options = ParserOptions::default()
        .with_scripting(!cli.no_scripting)
        .with_parse_error_logging(false);

    let (tree, root, issues) = match cli.fragment {
        Some(ref context) => parse_fragment(&input, context, options, cli.chunk_size)?,
        None => {
            let (tree, issues) = parse_document(&input, options, cli.chunk_size)?;
            (tree, None, issues)
        }
    };

    match (cli.format, root) {
        (Format::Tree, Some(root)) => println!("{}", dump_children(&tree, root)),
        (Format::Tree, None) => println!("{}", dump_document(&tree)),
        (Format::Html, Some(root)) => println!("{}", serialize_children(&tree, root)),
        (Format::Html, None) => println!("{}", serialize_children(&tree, tree.root())),
        (Format::Tokens, _) => {}
    }

    if cli.issues {
        print_issues(&issues);
    }

    Ok(())
}

/// Load input from CLI arguments
fn load_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        anyhow::bail!("expected a file path or --html")
    }
}

/// Feed `input` to `parser`, in chunks of `chunk_size` code units when set.
fn feed(parser: &mut HtmlParser<DomTree>, input: &str, chunk_size: Option<usize>) -> Result<()> {
    let units: Vec<u16> = input.encode_utf16().collect();
    let chunk_size = chunk_size.unwrap_or(units.len()).max(1);

    let mut status = ParseStatus::NeedMoreInput;
    let mut chunks = units.chunks(chunk_size).peekable();
    while let Some(chunk) = chunks.next() {
        status = parser.parse(chunk, chunks.peek().is_none())?;
    }
    if units.is_empty() {
        status = parser.parse(&[], true)?;
    }

    if status != ParseStatus::Finished {
        anyhow::bail!("parser stopped early: {status:?}");
    }
    Ok(())
}

fn parse_document(
    input: &str,
    options: ParserOptions,
    chunk_size: Option<usize>,
) -> Result<(DomTree, Vec<ParseIssue>)> {
    let mut parser = HtmlParser::new(DomTree::new(), options);
    feed(&mut parser, input, chunk_size)?;
    let issues = parser.issues();
    Ok((parser.into_sink(), issues))
}

fn parse_fragment(
    input: &str,
    context: &str,
    options: ParserOptions,
    chunk_size: Option<usize>,
) -> Result<(DomTree, Option<heron_dom::NodeId>, Vec<ParseIssue>)> {
    let name = match context.split_once(' ') {
        Some(("svg", local)) => QualName::new(Namespace::Svg, local),
        Some(("math", local)) => QualName::new(Namespace::MathMl, local),
        _ => QualName::html(context.to_ascii_lowercase()),
    };

    let mut tree = DomTree::new();
    let context = tree.create_element(name);
    let mut parser = HtmlParser::new_fragment(tree, &context, options);
    feed(&mut parser, input, chunk_size)?;

    let root = parser.fragment_root().copied();
    let issues = parser.issues();
    Ok((parser.into_sink(), root, issues))
}

/// Print the token stream as html5lib-style JSON.
fn print_tokens(cli: &Cli, input: &str) -> Result<()> {
    let mut options = TokenizerOptions::default();
    if let Some(ref state) = cli.initial_state {
        let state = TokenizerState::from_str(state).map_err(|_| HtmlError::UnknownState(state.clone()))?;
        options = options.with_initial_state(state);
    }
    if let Some(ref tag) = cli.last_start_tag {
        options = options.with_last_start_tag(tag.clone());
    }

    // Chunks end on character boundaries here; the collector takes `&str`.
    let chunk_size = cli.chunk_size.unwrap_or(usize::MAX).max(1);
    let mut chunks = vec![String::new()];
    for c in input.chars() {
        if chunks.last().is_some_and(|chunk| chunk.encode_utf16().count() >= chunk_size) {
            chunks.push(String::new());
        }
        if let Some(chunk) = chunks.last_mut() {
            chunk.push(c);
        }
    }
    let collected = TokenCollector::collect_chunks(chunks.iter().map(String::as_str), options);

    println!("{}", serde_json::to_string_pretty(&collected.to_html5lib_json())?);
    if cli.issues {
        print_issues(&collected.issues);
    }
    Ok(())
}

fn print_issues(issues: &[ParseIssue]) {
    println!();
    if issues.is_empty() {
        println!("{}", "No parse errors".green());
        return;
    }
    println!("{}", format!("=== {} parse errors ===", issues.len()).yellow().bold());
    for issue in issues {
        let source = serde_json::to_value(issue.source)
            .ok()
            .and_then(|value| value.as_str().map(str::to_owned))
            .unwrap_or_default();
        println!("  [{}] {}", source.dimmed(), issue.message);
    }
}
