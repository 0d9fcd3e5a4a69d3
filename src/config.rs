// qbank/src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::{Path, PathBuf}};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "qbank.toml";

/// Config is merged: defaults -> file -> command line
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Corpus root holding one directory per subject.
    pub root: PathBuf,
    /// Indentation width used when a question file is rewritten.
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { root: PathBuf::from("questions"), indent: 4 }
    }
}

/// Values the command line may override; `None` keeps the file/default value.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
}

fn merge(a: &mut Config, b: &Overrides) {
    if let Some(root) = &b.root { a.root = root.clone(); }
}

impl Config {
    fn read_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parse toml {}", path.display()))
    }

    /// Loads `explicit` (must exist) or the default file if present, then applies `overrides`.
    pub fn load(explicit: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut cfg = match explicit {
            Some(p) => Self::read_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::read_file(Path::new(DEFAULT_CONFIG_FILE))?,
            None => Config::default(),
        };
        merge(&mut cfg, overrides);
        if cfg.indent == 0 { anyhow::bail!("indent must be at least 1"); }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("qbank.toml");
        fs::write(&p, "indent = 2\n").unwrap();
        let cfg = Config::load(Some(&p), &Overrides::default()).unwrap();
        assert_eq!(cfg, Config { root: PathBuf::from("questions"), indent: 2 });
    }

    #[test]
    fn command_line_root_wins() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("qbank.toml");
        fs::write(&p, "root = \"bank\"\n").unwrap();
        let cfg = Config::load(Some(&p), &Overrides { root: Some("other".into()) }).unwrap();
        assert_eq!(cfg.root, PathBuf::from("other"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml")), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn zero_indent_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("qbank.toml");
        fs::write(&p, "indent = 0\n").unwrap();
        assert!(Config::load(Some(&p), &Overrides::default()).is_err());
    }
}
