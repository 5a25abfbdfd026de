use crate::error::FoldingError;
use crate::split::{BucketAssignment, FoldIter, FoldSplit, Partitioner};
use crate::utils;
use log::debug;
use serde::{Deserialize, Serialize};

/// Plain k-fold partitioner: assigns each index of `[0, n)` to one of `k`
/// folds by slicing a permutation into contiguous balanced blocks.
///
/// The first `n % k` folds take `ceil(n/k)` indices, the remaining folds
/// `floor(n/k)`. With `shuffle` off the permutation is the identity, so each
/// test set is the contiguous block implied by index order; with `shuffle`
/// on, the permutation comes from a `ChaCha8Rng` owned by this instance and
/// the same seed always reproduces the same folds.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct KFold {
    n: usize,
    shuffle: bool,
    seed: Option<u64>,
    assignment: BucketAssignment,
}

impl KFold {
    pub fn new(
        n: usize,
        k: usize,
        shuffle: bool,
        seed: Option<u64>,
    ) -> Result<KFold, FoldingError> {
        if n == 0 {
            return Err(FoldingError::InvalidArgument(
                "sample count must be positive".to_string(),
            ));
        }
        if k < 2 {
            return Err(FoldingError::InvalidArgument(format!(
                "fold count must be at least 2, got {}",
                k
            )));
        }
        if k > n {
            return Err(FoldingError::InvalidArgument(format!(
                "fold count {} exceeds sample count {}",
                k, n
            )));
        }

        let indices: Vec<usize> = (0..n).collect();
        let buckets = if shuffle {
            let mut rng = utils::rng_from_seed(seed);
            utils::split_into_balanced_chunks(indices, k, Some(&mut rng))
        } else {
            utils::split_into_balanced_chunks(indices, k, None)
        };

        debug!(
            "Partitioned {} samples into {} folds (shuffle: {}, seed: {:?})",
            n, k, shuffle, seed
        );

        Ok(KFold {
            n,
            shuffle,
            seed,
            assignment: BucketAssignment::from_buckets(buckets, n),
        })
    }

    pub fn sample_count(&self) -> usize {
        self.n
    }
}

impl Partitioner for KFold {
    fn fold_count(&self) -> usize {
        self.assignment.fold_count()
    }

    fn split_sizes(&self) -> &[usize] {
        self.assignment.sizes()
    }

    fn split(&self, fold: usize) -> Result<FoldSplit, FoldingError> {
        self.assignment.split(fold)
    }

    fn iter(&self) -> FoldIter<'_> {
        self.assignment.iter()
    }
}

impl<'a> IntoIterator for &'a KFold {
    type Item = FoldSplit;
    type IntoIter = FoldIter<'a>;

    fn into_iter(self) -> FoldIter<'a> {
        self.iter()
    }
}
