use crate::error::FoldingError;
use serde::{Deserialize, Serialize};

/// The train/test index pair for one fold: `test` is that fold's bucket,
/// `train` is every other index.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FoldSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Capability shared by the two partitioner variants: produce K balanced
/// folds over `[0, n)` and hand out the train/test split of each.
///
/// The bucket assignment is computed once at construction and is immutable,
/// so queries are read-only and instances can be shared across threads.
pub trait Partitioner {
    /// Number of folds K.
    fn fold_count(&self) -> usize;

    /// Test-set size of each fold, in fold order; the sizes sum to `n`.
    fn split_sizes(&self) -> &[usize];

    /// Train/test split of the given fold.
    fn split(&self, fold: usize) -> Result<FoldSplit, FoldingError>;

    /// Iterate over all K splits in fold order. The sequence is restartable:
    /// a second pass yields exactly the same splits.
    fn iter(&self) -> FoldIter<'_>;
}

/// Immutable mapping from fold id to the indices of that fold's test bucket.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct BucketAssignment {
    buckets: Vec<Vec<usize>>,
    sizes: Vec<usize>,
    n: usize,
}

impl BucketAssignment {
    pub(crate) fn from_buckets(buckets: Vec<Vec<usize>>, n: usize) -> BucketAssignment {
        let sizes = buckets.iter().map(Vec::len).collect();
        BucketAssignment { buckets, sizes, n }
    }

    pub(crate) fn fold_count(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub(crate) fn split(&self, fold: usize) -> Result<FoldSplit, FoldingError> {
        if fold >= self.buckets.len() {
            return Err(FoldingError::IndexOutOfRange {
                fold,
                folds: self.buckets.len(),
            });
        }
        Ok(self.compose(fold))
    }

    pub(crate) fn iter(&self) -> FoldIter<'_> {
        FoldIter {
            assignment: self,
            next_fold: 0,
        }
    }

    /// Test set is the fold's own bucket; the training set chains the other
    /// buckets in fold order.
    fn compose(&self, fold: usize) -> FoldSplit {
        let test = self.buckets[fold].clone();
        let mut train = Vec::with_capacity(self.n - test.len());
        for (i, bucket) in self.buckets.iter().enumerate() {
            if i != fold {
                train.extend_from_slice(bucket);
            }
        }
        FoldSplit { train, test }
    }
}

/// Lazy pass over the K splits of a partitioner, in increasing fold order.
pub struct FoldIter<'a> {
    assignment: &'a BucketAssignment,
    next_fold: usize,
}

impl Iterator for FoldIter<'_> {
    type Item = FoldSplit;

    fn next(&mut self) -> Option<FoldSplit> {
        if self.next_fold >= self.assignment.fold_count() {
            return None;
        }
        let split = self.assignment.compose(self.next_fold);
        self.next_fold += 1;
        Some(split)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.assignment.fold_count() - self.next_fold;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FoldIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment() -> BucketAssignment {
        BucketAssignment::from_buckets(vec![vec![0, 1], vec![2, 3], vec![4]], 5)
    }

    #[test]
    fn test_split_composes_train_from_other_buckets() {
        let split = assignment().split(1).unwrap();
        assert_eq!(split.test, vec![2, 3]);
        assert_eq!(split.train, vec![0, 1, 4]);
    }

    #[test]
    fn test_split_out_of_range() {
        let result = assignment().split(3);
        assert_eq!(
            result,
            Err(FoldingError::IndexOutOfRange { fold: 3, folds: 3 })
        );
    }

    #[test]
    fn test_iter_is_exact_size_and_restartable() {
        let assignment = assignment();
        assert_eq!(assignment.iter().len(), 3);

        let first_pass: Vec<FoldSplit> = assignment.iter().collect();
        let second_pass: Vec<FoldSplit> = assignment.iter().collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass.len(), 3);
    }

    #[test]
    fn test_fold_split_serialization() {
        let split = assignment().split(0).unwrap();
        let json = serde_json::to_string(&split).unwrap();
        let parsed: FoldSplit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, split);
    }
}
