// qbank/src/normalize.rs

//! Rewrites legacy snake_case question files into the current schema.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::{
    json_file::{read_json, write_json},
    schema::*,
};

#[derive(Clone, Debug, Default)]
pub struct NormalizeOptions {
    /// Report what would change without touching any file.
    pub dry_run: bool,
    /// Indentation width of rewritten files.
    pub indent: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub examined: usize,
    pub updated: usize,
    /// Files that could not be read or parsed.
    pub skipped: Vec<PathBuf>,
}

/// `null`, `false`, zero and empty strings, arrays or objects count as "no topic".
fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Moves the value of `from` to `to`. An existing `to` keeps its slot, a new one goes last.
fn rename_key(obj: &mut Map<String, Value>, from: &str, to: &str) -> bool {
    let Some(v) = obj.shift_remove(from) else { return false };
    obj.insert(to.to_string(), v);
    true
}

fn wrap_scalar_topics(obj: &mut Map<String, Value>) -> bool {
    match obj.get_mut(TOPICS) {
        Some(t) if !t.is_array() => {
            *t = Value::Array(vec![t.take()]);
            true
        }
        _ => false,
    }
}

/// Normalizes one question record in place and reports whether anything changed.
///
/// Applying it twice is a no-op the second time.
pub fn normalize_question(q: &mut Map<String, Value>) -> bool {
    let mut changed = false;

    changed |= rename_key(q, LEGACY_QUESTION_TYPE, QUESTION_TYPE);
    changed |= rename_key(q, LEGACY_ORIGINAL_TEXT, ORIGINAL_TEXT);

    if let Some(topic) = q.shift_remove(LEGACY_TOPIC) {
        if q.contains_key(TOPICS) {
            wrap_scalar_topics(q);
            if !is_falsy(&topic) {
                if let Some(Value::Array(list)) = q.get_mut(TOPICS) {
                    if !list.contains(&topic) { list.push(topic); }
                }
            }
        } else {
            let list = if is_falsy(&topic) { vec![] } else { vec![topic] };
            q.insert(TOPICS.to_string(), Value::Array(list));
        }
        changed = true;
    }

    if !q.contains_key(TOPICS) {
        q.insert(TOPICS.to_string(), Value::Array(vec![]));
        changed = true;
    } else {
        changed |= wrap_scalar_topics(q);
    }

    if let Some(Value::Array(answers)) = q.get_mut(ANSWERS) {
        for ans in answers.iter_mut() {
            if let Value::Object(a) = ans {
                changed |= rename_key(a, LEGACY_IS_CORRECT, IS_CORRECT);
            }
        }
    }

    changed
}

/// Normalizes every `question.json` below `root`.
pub fn normalize_tree(root: &Path, opts: &NormalizeOptions) -> NormalizeSummary {
    let mut summary = NormalizeSummary::default();

    let walker = WalkDir::new(root).sort_by_file_name().into_iter();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!("skipping unreadable entry under {}: {err}", root.display());
                continue;
            }
        };
        // is_file() on the path so a symlinked question.json counts too
        if entry.file_name() != QUESTION_FILE || !entry.path().is_file() { continue; }

        let path = entry.path();
        summary.examined += 1;

        let mut value = match read_json(path) {
            Ok(v) => v,
            Err(err) => {
                error!("Error decoding {}: {err}", path.display());
                summary.skipped.push(path.to_path_buf());
                continue;
            }
        };
        let Some(obj) = value.as_object_mut() else {
            warn!("{} is not a JSON object; left as is", path.display());
            continue;
        };

        if !normalize_question(obj) { continue; }

        if opts.dry_run {
            info!("would update {}", path.display());
            summary.updated += 1;
            continue;
        }
        match write_json(path, &value, opts.indent) {
            Ok(()) => {
                debug!("updated {}", path.display());
                summary.updated += 1;
            }
            Err(err) => error!("{err}"),
        }
    }

    summary
}
