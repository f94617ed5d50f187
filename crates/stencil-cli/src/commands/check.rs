//! Implementation of the `stencil check` command.
//!
//! Checking parses every marker body eagerly, the way a strict
//! [`stencil::Engine`] would, so deferred syntax errors surface before
//! a template ships.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::Serialize;
use stencil::script::{parse_expression, parse_statements};
use stencil::{tokenize, ParseError, Token, TokenKind};

use crate::output::{TemplateDiagnostic, body_byte_offset};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Template files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the token stream for each file instead of checking
    #[arg(long)]
    pub dump_tokens: bool,
}

/// JSON output for a single syntax issue.
#[derive(Serialize)]
pub struct CheckIssue {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// A marker body located within its source document.
struct MarkerSite<'a> {
    body: &'a str,
    /// Byte offset of the body within the document.
    offset: usize,
    kind: TokenKind,
}

/// Walk the token stream, recovering each marker body's byte offset.
///
/// Tokenization is lossless, so offsets follow from span lengths alone:
/// text spans cover their own bytes, `` [`...`] `` adds four delimiter
/// bytes and `` [=`...`] `` five.
fn marker_sites(tokens: &[Token]) -> Vec<MarkerSite<'_>> {
    let mut sites = Vec::new();
    let mut cursor = 0;

    for token in tokens {
        match token.kind {
            TokenKind::Text => cursor += token.value.len(),
            TokenKind::Statement => {
                sites.push(MarkerSite {
                    body: &token.value,
                    offset: cursor + 2,
                    kind: TokenKind::Statement,
                });
                cursor += token.value.len() + 4;
            }
            TokenKind::Write => {
                sites.push(MarkerSite {
                    body: &token.value,
                    offset: cursor + 3,
                    kind: TokenKind::Write,
                });
                cursor += token.value.len() + 5;
            }
        }
    }

    sites
}

/// Parse one marker body, tolerating blank bodies.
fn check_site(site: &MarkerSite<'_>) -> Result<(), ParseError> {
    if site.body.trim().is_empty() {
        return Ok(());
    }
    match site.kind {
        TokenKind::Write => parse_expression(site.body).map(|_| ()),
        TokenKind::Statement => parse_statements(site.body).map(|_| ()),
        TokenKind::Text => Ok(()),
    }
}

/// Convert a document byte offset to 1-based line and column.
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let prefix = &content[..offset.min(content.len())];
    let line = prefix.matches('\n').count() + 1;
    let column = prefix.rfind('\n').map_or(offset + 1, |nl| offset - nl);
    (line, column)
}

/// Check one file, reporting any issues found.
fn check_file(
    path: &Path,
    json: bool,
    verbose: bool,
    issues: &mut Vec<CheckIssue>,
) -> miette::Result<()> {
    let content = read_to_string(path)
        .map_err(|e| miette::miette!("Cannot read template file {}: {}", path.display(), e))?;

    let tokens = tokenize(&content);
    let mut clean = true;

    for site in marker_sites(&tokens) {
        if let Err(err) = check_site(&site) {
            clean = false;
            let (line, column) = match &err {
                ParseError::Syntax { line, column, .. }
                | ParseError::UnexpectedEof { line, column } => {
                    body_position(&content, site.body, site.offset, *line, *column)
                }
            };
            if !json {
                let diagnostic = TemplateDiagnostic::from_parse_error(
                    path,
                    &content,
                    site.body,
                    site.offset,
                    &err,
                );
                eprintln!("{:?}", miette::Report::new(diagnostic));
            }
            issues.push(CheckIssue {
                file: path.display().to_string(),
                line,
                column,
                message: err.to_string(),
            });
        }
    }

    if clean && verbose && !json {
        println!("{}: ok", path.display());
    }

    Ok(())
}

/// Translate a body-relative line:column to a document position.
fn body_position(
    content: &str,
    body: &str,
    body_offset: usize,
    line: usize,
    column: usize,
) -> (usize, usize) {
    line_column(content, body_offset + body_byte_offset(body, line, column))
}

/// Run the check command.
pub fn run_check(args: CheckArgs, verbose: bool) -> miette::Result<i32> {
    if args.dump_tokens {
        for path in &args.files {
            let content = read_to_string(path).map_err(|e| {
                miette::miette!("Cannot read template file {}: {}", path.display(), e)
            })?;
            let tokens = tokenize(&content);
            println!(
                "{}",
                serde_json::to_string_pretty(&tokens).expect("JSON serialization should not fail")
            );
        }
        return Ok(exitcode::OK);
    }

    let mut issues = Vec::new();
    for path in &args.files {
        check_file(path, args.json, verbose, &mut issues)?;
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&issues).expect("JSON serialization should not fail")
        );
    }

    if issues.is_empty() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
