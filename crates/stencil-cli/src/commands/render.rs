//! Implementation of the `stencil render` command.

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::PathBuf;

use serde::Serialize;
use stencil::{partial_loader, render, standard_library, Value};

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Template file to render
    #[arg(required = true)]
    pub template: PathBuf,

    /// Parameters in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Directory to resolve partials from (defaults to the template's directory)
    #[arg(long)]
    pub partials: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for render results.
#[derive(Serialize)]
pub struct RenderResult {
    pub output: String,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Convert a raw parameter string to the narrowest matching value type.
fn coerce_param(raw: String) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        Value::from(n)
    } else if let Ok(f) = raw.parse::<f64>() {
        Value::from(f)
    } else if let Ok(b) = raw.parse::<bool>() {
        Value::from(b)
    } else {
        Value::from(raw)
    }
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let source = read_to_string(&args.template).map_err(|e| {
        miette::miette!("Cannot read template file {}: {}", args.template.display(), e)
    })?;

    let mut context: HashMap<String, Value> = standard_library();
    for (name, raw) in args.params {
        context.insert(name, coerce_param(raw));
    }

    // Partials resolve relative to the template unless overridden.
    let partial_dir = match args.partials {
        Some(dir) => dir,
        None => args
            .template
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let loader = partial_loader(partial_dir, context.clone());
    context.insert("partial".to_string(), loader);

    match render(&source, &context) {
        Ok(result) => {
            if args.json {
                let output = RenderResult { output: result };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                print!("{}", result);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                eprintln!("Render error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}
