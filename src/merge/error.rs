use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("Inconsistent totals in group {base}: {totals:?}")]
    InconsistentTotals { base: String, totals: Vec<usize> },

    #[error("Group {base} is missing parts {missing:?} of {total}")]
    MissingParts {
        base: String,
        total: usize,
        missing: Vec<usize>,
    },

    #[error("Group {base} has no usable parts")]
    Empty { base: String },
}
