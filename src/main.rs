//! hatchdoc: generate a cross-linked HTML API reference from tagged
//! documentation comments in C++ source files.
//!
//! Two modes:
//!
//! - **stdin mode**: `hatchdoc < Math.cpp > reference.html`
//! - **file mode**: `hatchdoc source/ -o reference.html`

mod index;
mod links;
mod marker;
mod model;
mod parser;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use index::DocIndex;

#[derive(Parser)]
#[command(
    name = "hatchdoc",
    about = "Generate an HTML API reference from tagged C++ documentation comments"
)]
struct Cli {
    /// Input files or directories (glob patterns supported). Directories
    /// are scanned recursively for C++ sources. If omitted, reads from
    /// stdin.
    paths: Vec<String>,

    /// Output HTML file. Writes to stdout when omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut doc_index = DocIndex::new();

    if cli.paths.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        for record in parser::parse_source(&input) {
            doc_index.register(record);
        }
    } else {
        // Each source is drained and registered before the next is opened;
        // registration order decides anchor-table precedence.
        for path in expand_globs(&cli.paths)? {
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("warning: skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            for record in parser::parse_source(&content) {
                doc_index.register(record);
            }
        }
    }

    write_output(&doc_index, cli.output.as_deref())
}

fn write_output(doc_index: &DocIndex, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            render::write_document(doc_index, &mut out)
                .with_context(|| format!("failed to write {}", path.display()))?;
            out.flush()
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            render::write_document(doc_index, &mut out).context("failed to write stdout")?;
        }
    }
    Ok(())
}

/// File extensions scanned inside directories.
const SUPPORTED_EXTENSIONS: &[&str] = &["cpp", "cc", "cxx"];

/// Expand command-line paths into a sorted, deduplicated file list.
/// Plain files pass through, directories are scanned recursively for
/// supported extensions, and anything else is treated as a glob pattern.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            for ext in SUPPORTED_EXTENSIONS {
                let recursive = format!("{}/**/*.{}", pattern.trim_end_matches('/'), ext);
                let matches = glob::glob(&recursive)
                    .with_context(|| format!("invalid glob pattern: {}", recursive))?;
                files.extend(matches.filter_map(|r| r.ok()).filter(|p| p.is_file()));
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}
