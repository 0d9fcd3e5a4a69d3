// qbank/src/json_file.rs

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use std::{fs, path::Path};

use crate::error::JsonFileError;

pub fn read_json(path: &Path) -> Result<Value, JsonFileError> {
    let text = fs::read_to_string(path)
        .map_err(|source| JsonFileError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text)
        .map_err(|source| JsonFileError::Parse { path: path.to_path_buf(), source })
}

/// Renders `value` pretty-printed with `indent` spaces. Non-ASCII is written literally.
pub fn to_pretty_bytes(value: &Value, indent: usize) -> Result<Vec<u8>, serde_json::Error> {
    let pad = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(pad.as_bytes()));
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Overwrites `path` with the pretty-printed `value`.
pub fn write_json(path: &Path, value: &Value, indent: usize) -> Result<(), JsonFileError> {
    let bytes = to_pretty_bytes(value, indent)
        .map_err(|source| JsonFileError::Serialize { path: path.to_path_buf(), source })?;
    fs::write(path, bytes).map_err(|source| JsonFileError::Write { path: path.to_path_buf(), source })
}
