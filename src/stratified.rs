use crate::error::FoldingError;
use crate::split::{BucketAssignment, FoldIter, FoldSplit, Partitioner};
use crate::utils;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Stratified k-fold partitioner: each class is partitioned into `k`
/// balanced buckets independently, then bucket `i` of every class is merged
/// to form fold `i`, so every fold keeps the dataset's class proportions.
///
/// Classes are iterated in first-seen label order, and a single `ChaCha8Rng`
/// shuffles each class's indices in that order, so a fixed seed reproduces
/// the exact same folds. Global fold sizes approximate `n / k`: they are the
/// sum of each class's own balanced split, so the total imbalance is bounded
/// by the number of classes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StratifiedKFold<L> {
    n: usize,
    shuffle: bool,
    seed: Option<u64>,
    /// Per-class test-bucket sizes in first-seen label order.
    class_sizes: Vec<(L, Vec<usize>)>,
    assignment: BucketAssignment,
}

impl<L: Eq + Hash + Clone + Debug> StratifiedKFold<L> {
    pub fn new(
        labels: &[L],
        k: usize,
        shuffle: bool,
        seed: Option<u64>,
    ) -> Result<StratifiedKFold<L>, FoldingError> {
        if labels.is_empty() {
            return Err(FoldingError::InvalidArgument(
                "label sequence is empty".to_string(),
            ));
        }
        let n = labels.len();
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

        // Group indices by label, keeping first-seen label order so that
        // class iteration is stable across runs.
        let mut class_order: Vec<L> = Vec::new();
        let mut class_indices: HashMap<L, Vec<usize>> = HashMap::new();
        for (index, label) in labels.iter().enumerate() {
            class_indices
                .entry(label.clone())
                .or_insert_with(|| {
                    class_order.push(label.clone());
                    Vec::new()
                })
                .push(index);
        }

        // Every class must be able to give each fold at least one sample,
        // otherwise some folds would see no example of a rare class.
        if let Some((label, count)) = class_order
            .iter()
            .map(|label| (label, class_indices[label].len()))
            .min_by_key(|(_, count)| *count)
        {
            if count < k {
                return Err(FoldingError::InsufficientSamples {
                    class: format!("{:?}", label),
                    count,
                    folds: k,
                });
            }
        }

        let mut rng = if shuffle {
            Some(utils::rng_from_seed(seed))
        } else {
            None
        };

        let mut class_sizes = Vec::with_capacity(class_order.len());
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); k];
        for label in class_order {
            let indices = class_indices.remove(&label).unwrap_or_default();
            let chunks = utils::split_into_balanced_chunks(indices, k, rng.as_mut());
            class_sizes.push((label, chunks.iter().map(Vec::len).collect()));
            for (fold, chunk) in chunks.into_iter().enumerate() {
                buckets[fold].extend(chunk);
            }
        }

        debug!(
            "Stratified {} samples over {} classes into {} folds (shuffle: {}, seed: {:?})",
            n,
            class_sizes.len(),
            k,
            shuffle,
            seed
        );

        Ok(StratifiedKFold {
            n,
            shuffle,
            seed,
            class_sizes,
            assignment: BucketAssignment::from_buckets(buckets, n),
        })
    }

    pub fn sample_count(&self) -> usize {
        self.n
    }

    /// Distinct labels in first-seen order.
    pub fn classes(&self) -> Vec<&L> {
        self.class_sizes.iter().map(|(label, _)| label).collect()
    }

    /// Label counts within the given fold's test set, for asserting that
    /// class proportions are preserved.
    pub fn class_distribution(&self, fold: usize) -> Result<HashMap<L, usize>, FoldingError> {
        if fold >= self.assignment.fold_count() {
            return Err(FoldingError::IndexOutOfRange {
                fold,
                folds: self.assignment.fold_count(),
            });
        }
        Ok(self
            .class_sizes
            .iter()
            .map(|(label, sizes)| (label.clone(), sizes[fold]))
            .collect())
    }
}

impl<L> Partitioner for StratifiedKFold<L> {
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

impl<'a, L> IntoIterator for &'a StratifiedKFold<L> {
    type Item = FoldSplit;
    type IntoIter = FoldIter<'a>;

    fn into_iter(self) -> FoldIter<'a> {
        self.iter()
    }
}
