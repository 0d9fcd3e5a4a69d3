// qbank/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use qbank::{normalize_tree, validate_corpus, Config, NormalizeOptions, Overrides};

#[derive(Parser)]
#[command(name = "qbank", version, about = "Question bank maintenance tools")]
struct Cli {
    /// TOML config file (default: ./qbank.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Corpus root; overrides the config file
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Rename legacy keys and coerce `topics` to a list, rewriting changed files
    Normalize {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Check every question against the key schema and for duplicate IDs
    Validate,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(cli.config.as_deref(), &Overrides { root: cli.root })?;
    match cli.cmd {
        Cmd::Normalize { dry_run } => normalize(&cfg, dry_run),
        Cmd::Validate => validate(&cfg),
    }
}

fn normalize(cfg: &Config, dry_run: bool) -> Result<()> {
    info!("normalizing question files under {}", cfg.root.display());
    let opts = NormalizeOptions { dry_run, indent: cfg.indent };
    let summary = normalize_tree(&cfg.root, &opts);
    if dry_run {
        println!("Processed {} questions. Would update {} files.", summary.examined, summary.updated);
    } else {
        println!("Processed {} questions. Updated {} files.", summary.examined, summary.updated);
    }
    Ok(())
}

fn validate(cfg: &Config) -> Result<()> {
    info!("validating corpus at {}", cfg.root.display());
    let report = validate_corpus(&cfg.root)?;
    info!("checked {} subjects, {} questions, {} problems", report.subjects, report.questions, report.errors.len());
    println!("{}", report.render());
    if !report.is_ok() {
        std::process::exit(1);
    }
    Ok(())
}
