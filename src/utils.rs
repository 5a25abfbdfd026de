use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Build the generator owned by one partitioner: seeded when a seed is
/// given, entropy-seeded otherwise. Never a shared global generator.
pub(crate) fn rng_from_seed(seed: Option<u64>) -> ChaCha8Rng {
    seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64)
}

/// Sizes of `k` balanced contiguous chunks of `n` items: the first `n % k`
/// chunks take one extra item.
pub(crate) fn balanced_chunk_sizes(n: usize, k: usize) -> Vec<usize> {
    let base_size = n / k;
    let extra_elements = n % k;
    (0..k)
        .map(|i| base_size + usize::from(i < extra_elements))
        .collect()
}

/// Slice a vector of indices into `k` chunks of approximately the same size,
/// shuffling first when a generator is supplied.
pub(crate) fn split_into_balanced_chunks(
    mut indices: Vec<usize>,
    k: usize,
    rng: Option<&mut ChaCha8Rng>,
) -> Vec<Vec<usize>> {
    if let Some(rng) = rng {
        indices.shuffle(rng);
    }

    let mut chunks = Vec::with_capacity(k);
    let mut start = 0;
    for chunk_size in balanced_chunk_sizes(indices.len(), k) {
        let end = start + chunk_size;
        chunks.push(indices[start..end].to_vec());
        start = end;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_chunk_sizes_sum_to_n() {
        for n in 1..50 {
            for k in 1..=n {
                let sizes = balanced_chunk_sizes(n, k);
                assert_eq!(sizes.len(), k);
                assert_eq!(sizes.iter().sum::<usize>(), n);
                for size in &sizes {
                    assert!(*size == n / k || *size == n / k + 1);
                }
            }
        }
    }

    #[test]
    fn test_balanced_chunk_sizes_front_loaded() {
        // 10 items in 3 chunks: the remainder goes to the first chunks
        assert_eq!(balanced_chunk_sizes(10, 3), vec![4, 3, 3]);
        assert_eq!(balanced_chunk_sizes(10, 5), vec![2, 2, 2, 2, 2]);
    }

    #[test]
    fn test_split_without_rng_keeps_order() {
        let chunks = split_into_balanced_chunks((0..7).collect(), 3, None);
        assert_eq!(chunks, vec![vec![0, 1, 2], vec![3, 4], vec![5, 6]]);
    }

    #[test]
    fn test_split_with_rng_is_reproducible() {
        let mut rng1 = rng_from_seed(Some(42));
        let mut rng2 = rng_from_seed(Some(42));
        let chunks1 = split_into_balanced_chunks((0..20).collect(), 4, Some(&mut rng1));
        let chunks2 = split_into_balanced_chunks((0..20).collect(), 4, Some(&mut rng2));
        assert_eq!(chunks1, chunks2);

        let mut all: Vec<usize> = chunks1.into_iter().flatten().collect();
        all.sort();
        assert_eq!(all, (0..20).collect::<Vec<usize>>());
    }
}
