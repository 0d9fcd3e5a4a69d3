// qbank/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::join_keys;

fn key_list(keys: &[String]) -> String {
    join_keys(keys.iter().map(String::as_str))
}

/// One problem found in the corpus. `Display` is the line printed in the report.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Subject {subject} is missing subject.json")]
    MissingSubjectFile { subject: String },

    #[error("Subject {subject} has an unreadable questions directory")]
    UnreadableQuestionsDir { subject: String },

    #[error("Question {id} in {subject} is missing question.json")]
    MissingQuestionFile { id: String, subject: String },

    #[error("Question {id} has invalid JSON")]
    InvalidJson { id: String },

    #[error("Question {id} is not a JSON object")]
    NotAnObject { id: String },

    #[error("Question {id} contains forbidden keys: {}", key_list(.keys))]
    ForbiddenKeys { id: String, keys: Vec<String> },

    #[error("Question {id} is missing required keys: {}", key_list(.keys))]
    MissingKeys { id: String, keys: Vec<String> },

    #[error("Answer {index} in question {id} has forbidden keys: {}", key_list(.keys))]
    ForbiddenAnswerKeys { id: String, index: usize, keys: Vec<String> },

    #[error("Answer {index} in question {id} is not a JSON object")]
    AnswerNotAnObject { id: String, index: usize },

    #[error("Duplicate question IDs found: {}", key_list(.ids))]
    DuplicateIds { ids: Vec<String> },
}

/// Failure to load or store a single JSON file.
#[derive(Debug, Error)]
pub enum JsonFileError {
    #[error("read {}: {source}", .path.display())]
    Read { path: PathBuf, #[source] source: std::io::Error },

    #[error("parse {}: {source}", .path.display())]
    Parse { path: PathBuf, #[source] source: serde_json::Error },

    #[error("serialize {}: {source}", .path.display())]
    Serialize { path: PathBuf, #[source] source: serde_json::Error },

    #[error("write {}: {source}", .path.display())]
    Write { path: PathBuf, #[source] source: std::io::Error },
}
