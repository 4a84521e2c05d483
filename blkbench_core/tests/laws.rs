//! Property tests for the pure arithmetic of the harness: segmentation and
//! work partitioning.
use blkbench_core::{partition, Segmentation};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// block_count = ceil(L / B), lengths sum to L, every block but the last is B.
    #[test]
    fn prop_segmentation_covers_input(len in 0usize..5_000_000, block_size in 1usize..2_000_000) {
        let seg = Segmentation::new(len, block_size, usize::MAX).unwrap();
        prop_assert_eq!(seg.block_count(), (len + block_size - 1) / block_size);

        let blocks: Vec<_> = seg.blocks().collect();
        prop_assert_eq!(blocks.len(), seg.block_count());
        prop_assert_eq!(blocks.iter().map(|b| b.len).sum::<usize>(), len);

        let mut expected_offset = 0;
        for (i, block) in blocks.iter().enumerate() {
            prop_assert_eq!(block.index, i);
            prop_assert_eq!(block.offset, expected_offset);
            prop_assert!(block.len > 0);
            if i + 1 < blocks.len() {
                prop_assert_eq!(block.len, block_size);
            } else {
                let rem = len % block_size;
                prop_assert_eq!(block.len, if rem == 0 { block_size } else { rem });
            }
            expected_offset += block.len;
        }
    }

    /// The T ranges tile [0, n) exactly once with at most one block of skew.
    #[test]
    fn prop_partition_tiles_index_space(threads in 1usize..64, extra in 0usize..10_000) {
        let block_count = threads + extra;
        let ranges = partition(block_count, threads).unwrap();
        prop_assert_eq!(ranges.len(), threads);

        let mut cursor = 0;
        for r in &ranges {
            prop_assert_eq!(r.start, cursor);
            prop_assert!(r.end >= r.start);
            cursor = r.end;
        }
        prop_assert_eq!(cursor, block_count);

        let min = ranges.iter().map(|r| r.len()).min().unwrap();
        let max = ranges.iter().map(|r| r.len()).max().unwrap();
        prop_assert!(max - min <= 1, "skew {} between ranges", max - min);
        prop_assert!(min >= 1);
    }

    /// Fewer blocks than threads still covers everything once.
    #[test]
    fn prop_partition_with_idle_workers(threads in 1usize..64, block_count in 0usize..64) {
        let ranges = partition(block_count, threads).unwrap();
        let covered: usize = ranges.iter().map(|r| r.len()).sum();
        prop_assert_eq!(covered, block_count);
        let mut seen = vec![0u8; block_count];
        for r in &ranges {
            for i in r.indices() {
                seen[i] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&c| c == 1));
    }
}

#[test]
fn zero_threads_is_a_configuration_error() {
    assert!(partition(10, 0).unwrap_err().is_configuration());
}

#[test]
fn four_way_split_of_ten() {
    let ranges: Vec<_> = partition(10, 4)
        .unwrap()
        .iter()
        .map(|r| (r.start, r.end))
        .collect();
    assert_eq!(ranges, vec![(0, 2), (2, 5), (5, 7), (7, 10)]);
}
