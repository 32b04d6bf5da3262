//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use nestflat::core::input::load_documents;
use nestflat::core::render::{OutputFormat, RenderConfig, Renderer};
use nestflat::{flatten, FlattenOptions, MappingPolicy};

/// nestflat - flatten arbitrarily nested JSON into a stream of leaf values.
#[derive(Parser, Debug)]
#[command(name = "nestflat")]
#[command(
    author,
    version,
    about,
    long_about = r#"nestflat reads a JSON document and prints its leaf values in depth-first order.

Arrays are expanded recursively. Objects are handled by the mapping policy:
- drop (default): objects and their contents are omitted
- keep: objects are printed whole, as a single leaf
- flatten_values: only object values are flattened
- flatten_items: keys and values are both flattened

Output formats:
- jsonl: one JSON value per line (default)
- json: a single JSON array
- raw: strings unquoted, other values as compact JSON

Examples:
    echo '[1, [2, [3]]]' | nestflat
    nestflat data.json --mapping-policy flatten_items
    nestflat data.json --flatten-text --format raw
    nestflat events.jsonl --jsonl-input --mapping-policy keep
"#
)]
pub struct Cli {
    /// Input file (defaults to stdin).
    #[arg(
        value_name = "FILE",
        long_help = "JSON file to flatten. Reads stdin when omitted or when FILE is '-'."
    )]
    pub input: Option<PathBuf>,

    /// Split strings into single characters.
    #[arg(
        long,
        long_help = "Split strings of two or more characters into one leaf per character.\n\n\
Single-character strings are emitted as-is and empty strings produce no leaf.\n\
Object keys follow the same rule under --mapping-policy flatten_items."
    )]
    pub flatten_text: bool,

    /// How objects are treated (drop/keep/flatten_values/flatten_items).
    #[arg(
        long,
        default_value = "drop",
        env = "NESTFLAT_MAPPING_POLICY",
        value_name = "POLICY",
        long_help = "Select how objects are treated at every depth.\n\n\
Supported values:\n\
- drop (default)\n\
- keep\n\
- flatten_values\n\
- flatten_items\n\n\
An unrecognized value prints a warning and falls back to drop, unless --strict is set."
    )]
    pub mapping_policy: String,

    /// Fail on an unrecognized mapping policy instead of warning.
    #[arg(long)]
    pub strict: bool,

    /// Output format (jsonl/json/raw).
    #[arg(
        long,
        default_value = "jsonl",
        env = "NESTFLAT_FORMAT",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- jsonl (default): one JSON value per line, written as leaves are produced\n\
- json: a single JSON array\n\
- raw: strings unquoted, other values as compact JSON, one per line"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        long_help = "Indent JSON output. With --format jsonl each leaf spans several lines and\n\
leaves are separated by a blank line."
    )]
    pub pretty: bool,

    /// Treat each non-empty input line as its own JSON document.
    #[arg(
        long,
        long_help = "Read JSON Lines: every non-empty line is a separate document. Documents are\n\
flattened in order and their leaves concatenated."
    )]
    pub jsonl_input: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Install the stderr diagnostics subscriber. `RUST_LOG` takes precedence.
pub fn init_tracing(verbose: bool, quiet: bool) {
    let fallback = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn resolve_options(cli: &Cli) -> Result<FlattenOptions> {
    let mapping_policy = if cli.strict {
        cli.mapping_policy.parse::<MappingPolicy>()?
    } else {
        MappingPolicy::resolve(&cli.mapping_policy).0
    };
    Ok(FlattenOptions::new(cli.flatten_text, mapping_policy))
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format = match cli.format.parse::<OutputFormat>() {
        Ok(format) => format,
        Err(e) => {
            tracing::warn!("{e}, falling back to jsonl");
            OutputFormat::default()
        }
    };
    let render_config = RenderConfig::with_pretty(format, cli.pretty);
    let options = resolve_options(&cli)?;

    let documents = load_documents(cli.input.as_deref(), cli.jsonl_input).with_context(|| {
        match &cli.input {
            Some(path) => format!("failed to read {}", path.display()),
            None => "failed to read stdin".to_string(),
        }
    })?;
    tracing::debug!(
        documents = documents.len(),
        flatten_text = options.flatten_text,
        mapping_policy = %options.mapping_policy,
        "loaded input"
    );

    let leaves = documents.iter().flat_map(|document| flatten(document, options));
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let written = Renderer::with_config(render_config).render_to(leaves, &mut writer)?;
    writer.flush()?;

    tracing::debug!(leaves = written, "flattened input");
    Ok(())
}
