//! `dynjson` CLI: canonicalize, query, and validate JSON documents.
//!
//! ## Usage
//!
//! ```sh
//! # Canonical form (sorted keys, no whitespace) from stdin to stdout
//! echo '{"b":1,"a":[true, 2.5]}' | dynjson fmt
//!
//! # File to file
//! dynjson fmt -i data.json -o data.canonical.json
//!
//! # Look up a value by dotted path (numeric segments index arrays)
//! dynjson get data.list.0.name -i data.json
//!
//! # Validate; exit status 1 on malformed input
//! dynjson check --strict -i data.json
//! ```
//!
//! Set `RUST_LOG` or pass `-v` for diagnostics on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dynjson::Value;
use std::io::{self, Read};
use std::process;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dynjson",
    version,
    about = "Canonicalize, query, and validate JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical serialization of a document
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Reject content after the top-level value
        #[arg(long)]
        strict: bool,
    },
    /// Print the value found at a dotted path, e.g. `data.list.0.id`
    Get {
        /// Dotted path; numeric segments index arrays
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Reject content after the top-level value
        #[arg(long)]
        strict: bool,
    },
    /// Check that a document parses; prints `ok` or the error
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Reject content after the top-level value
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Fmt {
            input,
            output,
            strict,
        } => {
            debug!(command = "fmt", strict, "running");
            let value = load_document(input.as_deref(), strict)?;
            write_output(output.as_deref(), &value.to_json_string())?;
        }
        Commands::Get {
            path,
            input,
            strict,
        } => {
            debug!(command = "get", %path, strict, "running");
            let value = load_document(input.as_deref(), strict)?;
            let found = lookup(&value, &path)
                .with_context(|| format!("Path not found: {}", path))?;
            println!("{}", found);
        }
        Commands::Check { input, strict } => {
            debug!(command = "check", strict, "running");
            match load_document(input.as_deref(), strict) {
                Ok(_) => println!("ok"),
                Err(e) => {
                    println!("invalid: {:#}", e);
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Read and parse the whole input. `strict` rejects trailing non-whitespace.
fn load_document(path: Option<&str>, strict: bool) -> Result<Value> {
    let bytes = read_input(path)?;
    let text = std::str::from_utf8(&bytes).context("Input is not valid UTF-8")?;

    let started = Instant::now();
    let mut parser = dynjson::Parser::new(text);
    let result = if strict {
        parser.parse_document()
    } else {
        parser.parse()
    };
    let value = result.context("Failed to parse JSON")?;
    debug!(
        bytes = text.len(),
        consumed = parser.offset(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "parsed document"
    );
    Ok(value)
}

/// Walk a dotted path without mutating the tree.
fn lookup<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split('.').try_fold(root, |node, segment| match node {
        Value::Array(_) => segment.parse::<usize>().ok().and_then(|i| node.get(i)),
        _ => node.get_key(segment),
    })
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
