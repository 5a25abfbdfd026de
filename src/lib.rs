//! K-fold and stratified k-fold partitioning of sample indices for
//! cross-validation.
//!
//! [`KFold`] slices a (optionally seeded-shuffled) permutation of `[0, n)`
//! into `k` balanced contiguous buckets; [`StratifiedKFold`] does the same
//! per class so that every fold keeps the dataset's label proportions. Both
//! expose the [`Partitioner`] capability and yield one [`FoldSplit`] per
//! fold, either directly or through a restartable iterator.
//!
//! ```
//! use folding::{KFold, Partitioner};
//!
//! let kfold = KFold::new(10, 5, true, Some(42)).unwrap();
//! assert_eq!(kfold.split_sizes(), &[2, 2, 2, 2, 2]);
//! for split in &kfold {
//!     assert_eq!(split.test.len(), 2);
//!     assert_eq!(split.train.len(), 8);
//! }
//! ```

pub mod error;
pub mod kfold;
pub mod split;
pub mod stratified;
mod utils;

pub use error::FoldingError;
pub use kfold::KFold;
pub use split::{FoldIter, FoldSplit, Partitioner};
pub use stratified::StratifiedKFold;
