use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{fs, path::{Path, PathBuf}};

#[derive(Parser)]
#[command(name = "xtask", about = "qbank workspace tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Validate question JSON files against schemas/question.schema.json
    ValidateQuestion {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::ValidateQuestion { files } => validate_questions(&files),
    }
}

const SCHEMA: &str = include_str!("../../schemas/question.schema.json");

fn compile_schema() -> Result<jsonschema::Validator> {
    let schema: serde_json::Value = serde_json::from_str(SCHEMA).context("parse question schema")?;
    Ok(jsonschema::validator_for(&schema)?)
}

/// Schema violations of `data`, one line each.
fn violations(compiled: &jsonschema::Validator, data: &serde_json::Value) -> Vec<String> {
    compiled.iter_errors(data).map(|e| e.to_string()).collect()
}

/// Problems with one file: load failures or schema violations.
fn check_file(compiled: &jsonschema::Validator, path: &Path) -> Vec<String> {
    let data_text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => return vec![format!("read {}: {e}", path.display())],
    };
    match serde_json::from_str::<serde_json::Value>(&data_text) {
        Ok(data) => violations(compiled, &data),
        Err(e) => vec![format!("parse json {}: {e}", path.display())],
    }
}

fn validate_questions(files: &[PathBuf]) -> Result<()> {
    let compiled = compile_schema()?;
    let mut failed = false;
    for path in files {
        let errors = check_file(&compiled, path);
        if errors.is_empty() {
            println!("OK: {}", path.display());
            continue;
        }
        failed = true;
        eprintln!("Invalid: {}", path.display());
        for e in errors {
            eprintln!("- {}", e);
        }
    }
    if failed {
        std::process::exit(1);
    }
    Ok(())
}
