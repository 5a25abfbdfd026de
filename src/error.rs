use thiserror::Error;

/// Errors raised while building a partitioner or querying a fold.
///
/// Everything is detected eagerly: argument and class-size problems abort
/// construction, out-of-range fold ids abort the query. A failed
/// construction never leaves a partially initialized partitioner behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FoldingError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A class is too small to contribute a sample to every fold.
    #[error("class {class} has {count} samples but {folds} folds were requested")]
    InsufficientSamples {
        class: String,
        count: usize,
        folds: usize,
    },

    #[error("fold {fold} is out of range for {folds} folds")]
    IndexOutOfRange { fold: usize, folds: usize },
}
