//! Batch partitioning for lazy-mint registration.
//!
//! A lazy mint registers items on-chain in fixed-size chunks, one transaction
//! per chunk. Each chunk carries the absolute index at which the program
//! inserts it, offset by the number of items the collection has already
//! loaded. Start indices are strictly increasing across the returned batches.

use crate::errors::{DropError, DropResult};

/// One registration batch: the absolute insertion index plus its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBatch<T> {
    pub start_index: u64,
    pub items: Vec<T>,
}

/// Partition `items` into batches of at most `size`, assigning each batch the
/// absolute start index `offset + position`. The final batch may be short.
///
/// An empty input yields no batches. A zero batch size is rejected.
pub fn partition<T: Clone>(items: &[T], offset: u64, size: usize) -> DropResult<Vec<ItemBatch<T>>> {
    if size == 0 {
        return Err(DropError::invalid_argument("batch size must be greater than zero"));
    }

    let mut out = Vec::with_capacity(items.len().div_ceil(size));
    for (i, chunk) in items.chunks(size).enumerate() {
        out.push(ItemBatch {
            start_index: offset + (i * size) as u64,
            items: chunk.to_vec(),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_chunks_of_five() {
        let items: Vec<u32> = (0..13).collect();
        let batches = partition(&items, 0, 5).unwrap();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].items.len(), 5);
        assert_eq!(batches[1].items.len(), 5);
        assert_eq!(batches[2].items.len(), 3);
    }

    #[test]
    fn start_indices_offset_by_loaded_count() {
        let items: Vec<u32> = (0..12).collect();
        let batches = partition(&items, 7, 5).unwrap();
        let starts: Vec<u64> = batches.iter().map(|b| b.start_index).collect();
        assert_eq!(starts, vec![7, 12, 17]);
    }

    #[test]
    fn start_indices_strictly_increase() {
        let items: Vec<u32> = (0..23).collect();
        let batches = partition(&items, 100, 5).unwrap();
        for pair in batches.windows(2) {
            assert!(pair[0].start_index < pair[1].start_index);
        }
    }

    #[test]
    fn empty_input_yields_no_batches() {
        let batches = partition::<u32>(&[], 0, 5).unwrap();
        assert!(batches.is_empty());
    }

    #[test]
    fn zero_size_rejected() {
        assert!(partition(&[1u32], 0, 0).is_err());
    }
}
