//! Membership lookup over a set of closed ranges.
//!
//! Small sets are scanned linearly. Larger sets are indexed with a
//! centered interval tree so that [`IntervalSet::has`] stays logarithmic.

use std::ops::RangeInclusive;

/// At or below this many ranges a linear scan beats building a tree.
const LINEAR_SCAN_THRESHOLD: usize = 3;

/// A set of closed ranges supporting membership queries.
///
/// Ranges may overlap and need not be sorted. A value is a member if any
/// range contains it. Each range must already be oriented so that
/// `start <= end`; reversed ranges are empty and never match.
#[derive(Debug, Clone)]
pub struct IntervalSet<T = i64> {
    ranges: Vec<RangeInclusive<T>>,
    tree: Option<CenteredTree<T>>,
}

impl<T: Ord + Copy> IntervalSet<T> {
    /// Build a set from closed ranges.
    pub fn new(ranges: Vec<RangeInclusive<T>>) -> Self {
        let tree = if ranges.len() > LINEAR_SCAN_THRESHOLD {
            Some(CenteredTree::build(&ranges))
        } else {
            None
        };
        Self { ranges, tree }
    }

    /// Check whether `value` falls within at least one range.
    pub fn has(&self, value: T) -> bool {
        match &self.tree {
            Some(tree) => tree.contains(value),
            None => self.ranges.iter().any(|r| r.contains(&value)),
        }
    }

    /// The ranges this set was built from.
    pub fn ranges(&self) -> &[RangeInclusive<T>] {
        &self.ranges
    }

    /// Number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the set holds no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl<T: Ord + Copy> FromIterator<RangeInclusive<T>> for IntervalSet<T> {
    fn from_iter<I: IntoIterator<Item = RangeInclusive<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Centered interval tree stored in an arena.
///
/// Every node keeps the ranges that straddle its center point, summarized
/// by their smallest start and largest end: for a query left of the center
/// only the starts matter, for a query right of it only the ends.
#[derive(Debug, Clone)]
struct CenteredTree<T> {
    nodes: Vec<TreeNode<T>>,
    root: Option<usize>,
}

#[derive(Debug, Clone)]
struct TreeNode<T> {
    center: T,
    min_start: T,
    max_end: T,
    left: Option<usize>,
    right: Option<usize>,
}

impl<T: Ord + Copy> CenteredTree<T> {
    fn build(ranges: &[RangeInclusive<T>]) -> Self {
        let live: Vec<(T, T)> = ranges
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| (*r.start(), *r.end()))
            .collect();
        let mut tree = Self {
            nodes: Vec::with_capacity(live.len()),
            root: None,
        };
        tree.root = tree.insert_subtree(live);
        tree
    }

    // The center is the median start point. That range straddles the
    // center, so each level keeps at least one range and both sides get
    // at most half of the remainder.
    fn insert_subtree(&mut self, mut ranges: Vec<(T, T)>) -> Option<usize> {
        if ranges.is_empty() {
            return None;
        }
        ranges.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        let center = ranges[ranges.len() / 2].0;

        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut min_start = center;
        let mut max_end = center;
        for (start, end) in ranges {
            if end < center {
                left.push((start, end));
            } else if start > center {
                right.push((start, end));
            } else {
                min_start = min_start.min(start);
                max_end = max_end.max(end);
            }
        }

        let left = self.insert_subtree(left);
        let right = self.insert_subtree(right);
        self.nodes.push(TreeNode {
            center,
            min_start,
            max_end,
            left,
            right,
        });
        Some(self.nodes.len() - 1)
    }

    fn contains(&self, value: T) -> bool {
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            let node = &self.nodes[idx];
            if value < node.center {
                if node.min_start <= value {
                    return true;
                }
                cursor = node.left;
            } else if value > node.center {
                if node.max_end >= value {
                    return true;
                }
                cursor = node.right;
            } else {
                return true;
            }
        }
        false
    }
}
