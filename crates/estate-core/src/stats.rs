//! Tree height statistics.

use crate::models::{EstateStats, Tree};

/// Compute count, extremes and median of tree heights.
///
/// Returns `None` when there are no trees. For an even count the median is
/// the truncated mean of the two middle heights.
pub fn compute_statistics(trees: &[Tree]) -> Option<EstateStats> {
    let mut heights: Vec<u32> = trees.iter().map(|t| t.height).collect();
    heights.sort_unstable();

    let (&min, &max) = (heights.first()?, heights.last()?);
    let mid = heights.len() / 2;
    let median = if heights.len() % 2 == 1 {
        heights[mid]
    } else {
        // u64 so two heights near u32::MAX don't overflow
        ((u64::from(heights[mid - 1]) + u64::from(heights[mid])) / 2) as u32
    };

    Some(EstateStats {
        count: trees.len(),
        max,
        min,
        median,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trees_with_heights(heights: &[u32]) -> Vec<Tree> {
        heights
            .iter()
            .enumerate()
            .map(|(i, &h)| Tree::new(i as u32 + 1, 1, h))
            .collect()
    }

    #[test]
    fn test_even_count_median() {
        let stats = compute_statistics(&trees_with_heights(&[5, 3, 4, 4])).unwrap();
        assert_eq!(stats, EstateStats { count: 4, max: 5, min: 3, median: 4 });
    }

    #[test]
    fn test_odd_count_median() {
        let stats = compute_statistics(&trees_with_heights(&[10, 3, 5])).unwrap();
        assert_eq!(stats.median, 5);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, 3);
        assert_eq!(stats.max, 10);
    }

    #[test]
    fn test_even_median_truncates() {
        let stats = compute_statistics(&trees_with_heights(&[1, 2])).unwrap();
        assert_eq!(stats.median, 1);
    }

    #[test]
    fn test_single_tree() {
        let stats = compute_statistics(&trees_with_heights(&[7])).unwrap();
        assert_eq!(stats, EstateStats { count: 1, max: 7, min: 7, median: 7 });
    }

    #[test]
    fn test_empty_has_no_statistics() {
        assert!(compute_statistics(&[]).is_none());
    }

    #[test]
    fn test_order_independent() {
        let a = compute_statistics(&trees_with_heights(&[9, 1, 30, 12, 4, 4])).unwrap();
        let b = compute_statistics(&trees_with_heights(&[4, 30, 4, 1, 12, 9])).unwrap();
        assert_eq!(a, b);
    }
}
