use thiserror::Error;

/// Errors raised while converting boundary records into typed core inputs.
///
/// Missing fields are never errors (they propagate as `None` through the
/// calculators); these fire only on data that is present but malformed,
/// which is a caller bug and must not be silently coerced.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid date '{value}' in field '{field}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("unknown medical class '{0}'")]
    UnknownMedicalClass(String),
}
