// qbank/src/schema.rs

//! Key sets of the question record contract.

use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Top-level keys a question record may carry.
pub const ALLOWED_KEYS: [&str; 5] = ["question", "questionType", "topics", "answers", "originalText"];

/// Top-level keys every question record must carry.
pub const REQUIRED_KEYS: [&str; 4] = ["question", "questionType", "topics", "answers"];

/// Keys an answer record may carry.
pub const ALLOWED_ANSWER_KEYS: [&str; 2] = ["text", "isCorrect"];

pub const QUESTION_TYPE: &str = "questionType";
pub const ORIGINAL_TEXT: &str = "originalText";
pub const TOPICS: &str = "topics";
pub const ANSWERS: &str = "answers";
pub const IS_CORRECT: &str = "isCorrect";

// legacy snake_case spellings
pub const LEGACY_QUESTION_TYPE: &str = "question_type";
pub const LEGACY_ORIGINAL_TEXT: &str = "original_text";
pub const LEGACY_TOPIC: &str = "topic";
pub const LEGACY_IS_CORRECT: &str = "is_correct";

/// File and directory names of the on-disk layout.
pub const QUESTION_FILE: &str = "question.json";
pub const SUBJECT_FILE: &str = "subject.json";
pub const QUESTIONS_DIR: &str = "questions";

/// Keys of `obj` that are not in `allowed`, sorted.
pub fn forbidden_keys<'a>(obj: &'a Map<String, Value>, allowed: &[&str]) -> BTreeSet<&'a str> {
    obj.keys()
        .map(String::as_str)
        .filter(|k| !allowed.contains(k))
        .collect()
}

/// Keys of `required` that `obj` lacks, sorted.
pub fn missing_keys<'a>(obj: &Map<String, Value>, required: &[&'a str]) -> BTreeSet<&'a str> {
    required.iter().copied().filter(|k| !obj.contains_key(*k)).collect()
}

/// Joins a key set the way report lines print it.
pub fn join_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> String {
    keys.into_iter().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v { Value::Object(m) => m, _ => panic!("fixture must be an object") }
    }

    #[test]
    fn forbidden_keys_are_sorted_and_exclude_allowed() {
        let m = obj(json!({"zeta": 1, "question": "q", "alpha": 2}));
        let got: Vec<_> = forbidden_keys(&m, &ALLOWED_KEYS).into_iter().collect();
        assert_eq!(got, vec!["alpha", "zeta"]);
    }

    #[test]
    fn missing_keys_lists_only_absent_required() {
        let m = obj(json!({"question": "q", "topics": []}));
        let got: Vec<_> = missing_keys(&m, &REQUIRED_KEYS).into_iter().collect();
        assert_eq!(got, vec!["answers", "questionType"]);
    }

    #[test]
    fn join_keys_uses_comma_space() {
        assert_eq!(join_keys(["a", "b"]), "a, b");
        assert_eq!(join_keys(Vec::<&str>::new()), "");
    }
}
