// qbank/src/validate.rs

//! Read-only schema and uniqueness checks over a question corpus.

use anyhow::{Context, Result};
use serde_json::Value;
use std::{collections::BTreeMap, fs, path::{Path, PathBuf}};
use tracing::{debug, warn};

use crate::{
    error::{JsonFileError, ValidationError},
    json_file::read_json,
    schema::*,
};

#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    pub subjects: usize,
    pub questions: usize,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool { self.errors.is_empty() }

    /// Lines printed to stdout for this report.
    pub fn render(&self) -> String {
        if self.is_ok() {
            return "All questions validated successfully.".to_string();
        }
        let mut s = String::from("Validation failed:");
        for e in &self.errors {
            s.push_str(&format!("\n  - {e}"));
        }
        s
    }
}

fn owned(keys: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    keys.into_iter().map(Into::into).collect()
}

/// Checks one parsed question record against the allowed and required key sets.
pub fn validate_question(id: &str, record: &Value) -> Vec<ValidationError> {
    let mut errors = vec![];
    let Some(obj) = record.as_object() else {
        errors.push(ValidationError::NotAnObject { id: id.into() });
        return errors;
    };

    let extra = forbidden_keys(obj, &ALLOWED_KEYS);
    if !extra.is_empty() {
        errors.push(ValidationError::ForbiddenKeys { id: id.into(), keys: owned(extra) });
    }

    let missing = missing_keys(obj, &REQUIRED_KEYS);
    if !missing.is_empty() {
        errors.push(ValidationError::MissingKeys { id: id.into(), keys: owned(missing) });
    }

    if let Some(Value::Array(answers)) = obj.get(ANSWERS) {
        for (index, ans) in answers.iter().enumerate() {
            let Some(a) = ans.as_object() else {
                errors.push(ValidationError::AnswerNotAnObject { id: id.into(), index });
                continue;
            };
            let extra = forbidden_keys(a, &ALLOWED_ANSWER_KEYS);
            if !extra.is_empty() {
                errors.push(ValidationError::ForbiddenAnswerKeys { id: id.into(), index, keys: owned(extra) });
            }
        }
    }

    errors
}

/// Immediate child directories of `dir`, sorted by name. Entries that cannot be
/// read are logged and left out.
fn child_dirs(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut out = vec![];
    for e in fs::read_dir(dir)? {
        let e = match e {
            Ok(e) => e,
            Err(err) => {
                warn!("skipping unreadable entry in {}: {err}", dir.display());
                continue;
            }
        };
        let p = e.path();
        if !p.is_dir() { continue; }
        out.push((e.file_name().to_string_lossy().into_owned(), p));
    }
    out.sort();
    Ok(out)
}

/// IDs seen more than once, sorted.
fn duplicate_ids(ids: &[String]) -> Vec<String> {
    let mut counts = BTreeMap::<&str, usize>::new();
    for id in ids { *counts.entry(id.as_str()).or_default() += 1; }
    counts.into_iter().filter(|(_, n)| *n > 1).map(|(id, _)| id.to_string()).collect()
}

/// Scans every subject below `root`. Only an unreadable `root` is fatal,
/// everything else ends up in the report.
pub fn validate_corpus(root: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();
    let mut ids: Vec<String> = vec![];

    let subjects = child_dirs(root).with_context(|| format!("read dir {}", root.display()))?;
    for (subject, subject_dir) in subjects {
        report.subjects += 1;
        if !subject_dir.join(SUBJECT_FILE).exists() {
            report.errors.push(ValidationError::MissingSubjectFile { subject: subject.clone() });
        }

        let questions_dir = subject_dir.join(QUESTIONS_DIR);
        if !questions_dir.is_dir() { continue; }

        let questions = match child_dirs(&questions_dir) {
            Ok(q) => q,
            Err(err) => {
                warn!("cannot read {}: {err}", questions_dir.display());
                report.errors.push(ValidationError::UnreadableQuestionsDir { subject });
                continue;
            }
        };
        for (id, question_dir) in questions {
            if id.starts_with('.') { continue; }
            report.questions += 1;
            ids.push(id.clone());

            let file = question_dir.join(QUESTION_FILE);
            if !file.exists() {
                report.errors.push(ValidationError::MissingQuestionFile { id, subject: subject.clone() });
                continue;
            }
            let record = match read_json(&file) {
                Ok(v) => v,
                Err(err) => {
                    // undecodable bytes count as invalid JSON too
                    if matches!(err, JsonFileError::Read { .. }) { warn!("{err}"); }
                    report.errors.push(ValidationError::InvalidJson { id });
                    continue;
                }
            };
            report.errors.extend(validate_question(&id, &record));
        }
        debug!("checked subject {subject}");
    }

    let dups = duplicate_ids(&ids);
    if !dups.is_empty() {
        report.errors.push(ValidationError::DuplicateIds { ids: dups });
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({"question": "2+2?", "questionType": "mc", "topics": [], "answers": [{"text": "4", "isCorrect": true}]})
    }

    #[test]
    fn valid_record_has_no_errors() {
        assert!(validate_question("q1", &valid()).is_empty());
        let mut v = valid();
        v["originalText"] = json!("orig");
        assert!(validate_question("q1", &v).is_empty());
    }

    #[test]
    fn missing_question_type_is_reported() {
        let mut v = valid();
        v.as_object_mut().unwrap().shift_remove("questionType");
        assert_eq!(validate_question("q1", &v), vec![
            ValidationError::MissingKeys { id: "q1".into(), keys: vec!["questionType".into()] },
        ]);
    }

    #[test]
    fn extra_key_is_forbidden() {
        let mut v = valid();
        v["foo"] = json!(1);
        let errs = validate_question("q1", &v);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].to_string(), "Question q1 contains forbidden keys: foo");
    }

    #[test]
    fn answer_keys_are_checked_per_index() {
        let mut v = valid();
        v["answers"] = json!([{"text": "a"}, {"text": "b", "is_correct": true}, 3]);
        assert_eq!(validate_question("q1", &v), vec![
            ValidationError::ForbiddenAnswerKeys { id: "q1".into(), index: 1, keys: vec!["is_correct".into()] },
            ValidationError::AnswerNotAnObject { id: "q1".into(), index: 2 },
        ]);
    }

    #[test]
    fn non_list_answers_are_not_inspected() {
        let mut v = valid();
        v["answers"] = json!({"text": "a", "bogus": 1});
        assert!(validate_question("q1", &v).is_empty());
    }

    #[test]
    fn non_object_record() {
        assert_eq!(validate_question("q1", &json!([1, 2])), vec![ValidationError::NotAnObject { id: "q1".into() }]);
    }

    #[test]
    fn duplicates_are_reported_once_each() {
        let ids = owned(["b", "a", "b", "c", "a", "b"]);
        assert_eq!(duplicate_ids(&ids), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn render_lists_every_error() {
        let report = ValidationReport {
            errors: vec![
                ValidationError::MissingSubjectFile { subject: "math".into() },
                ValidationError::InvalidJson { id: "q2".into() },
            ],
            ..Default::default()
        };
        assert_eq!(
            report.render(),
            "Validation failed:\n  - Subject math is missing subject.json\n  - Question q2 has invalid JSON"
        );
        assert_eq!(ValidationReport::default().render(), "All questions validated successfully.");
    }
}
