pub mod config;
pub mod error;
pub mod json_file;
pub mod normalize;
pub mod schema;
pub mod validate;

pub use config::{Config, Overrides};
pub use error::{JsonFileError, ValidationError};
pub use normalize::{normalize_question, normalize_tree, NormalizeOptions, NormalizeSummary};
pub use validate::{validate_corpus, validate_question, ValidationReport};
