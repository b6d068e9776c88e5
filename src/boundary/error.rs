use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("Invalid {kind} pattern `{pattern}`: {source}")]
    InvalidPattern {
        kind: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Empty abbreviation in vocabulary")]
    EmptyAbbreviation,
}
