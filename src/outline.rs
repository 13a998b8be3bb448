//! Depth-first outline traversal and flattening.
//!
//! [`walk`] drives an [`OutlineVisitor`] over a tree with an explicit stack,
//! so arbitrarily deep outlines cannot overflow the call stack. [`flatten`]
//! builds on it to record every labeled node as a [`FlatEntry`].
//!
//! # Example
//!
//! ```
//! use outline_tasks::model::OutlineNode;
//! use outline_tasks::outline::flatten;
//!
//! let root = OutlineNode::root()
//!     .with_child(OutlineNode::labeled("A").with_child(OutlineNode::labeled("B")));
//! let flat = flatten(&root);
//! assert_eq!(flat.len(), 2);
//! assert_eq!(flat.max_depth(), Some(1));
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::OutlineNode;

/// Returned by [`OutlineVisitor::visit`] to continue or abandon a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkControl {
    /// Keep walking.
    #[default]
    Continue,

    /// Stop the walk immediately; no further callbacks are made.
    Stop,
}

/// Callbacks invoked for every labeled node of an outline.
///
/// The root wrapper is never reported and its children are at depth 0.
/// Both methods have no-op defaults.
pub trait OutlineVisitor {
    /// Called in pre-order, before any of the node's children.
    fn visit(&mut self, label: &str, depth: usize) -> WalkControl {
        let _ = (label, depth);
        WalkControl::Continue
    }

    /// Called in post-order with the height of the node's subtree
    /// (1 for a leaf).
    fn post_visit(&mut self, label: &str, depth: usize, height: usize) {
        let _ = (label, depth, height);
    }
}

/// Outcome of a [`walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    /// Height of the whole tree, root wrapper included
    pub root_height: usize,

    /// Number of labeled nodes reported to the visitor
    pub visited: usize,

    /// False when the visitor stopped the walk early
    pub completed: bool,
}

struct Frame<'a> {
    node: &'a OutlineNode,
    /// `None` for the root wrapper
    depth: Option<usize>,
    next_child: usize,
    max_child_height: usize,
}

/// Walk `root` depth-first, reporting labeled nodes to `visitor`.
pub fn walk<V: OutlineVisitor + ?Sized>(root: &OutlineNode, visitor: &mut V) -> WalkSummary {
    let mut stack = vec![Frame {
        node: root,
        depth: None,
        next_child: 0,
        max_child_height: 0,
    }];
    let mut summary = WalkSummary {
        root_height: 0,
        visited: 0,
        completed: true,
    };

    while let Some(frame) = stack.last_mut() {
        let node: &OutlineNode = frame.node;

        if let Some(child) = node.children.get(frame.next_child) {
            frame.next_child += 1;
            let depth = frame.depth.map_or(0, |d| d + 1);

            if let Some(label) = child.label.as_deref() {
                summary.visited += 1;
                if visitor.visit(label, depth) == WalkControl::Stop {
                    summary.completed = false;
                    return summary;
                }
            }

            stack.push(Frame {
                node: child,
                depth: Some(depth),
                next_child: 0,
                max_child_height: 0,
            });
            continue;
        }

        let height = frame.max_child_height + 1;
        let depth = frame.depth;
        stack.pop();

        if let (Some(depth), Some(label)) = (depth, node.label.as_deref()) {
            visitor.post_visit(label, depth, height);
        }

        match stack.last_mut() {
            Some(parent) => parent.max_child_height = parent.max_child_height.max(height),
            None => summary.root_height = height,
        }
    }

    summary
}

/// A labeled outline node with its traversal position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatEntry {
    /// 0-based pre-order position among labeled nodes
    pub index: usize,

    /// 0-based depth; the root's children are at depth 0
    pub depth: usize,

    /// Subtree height, 1 for a leaf
    pub height: usize,

    pub label: String,
}

/// The flattened form of an outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
    entries: Vec<FlatEntry>,
    root_height: usize,
}

impl Flattened {
    /// Entries in pre-order.
    pub fn entries(&self) -> &[FlatEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlatEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Height of the whole tree including the root wrapper.
    pub fn root_height(&self) -> usize {
        self.root_height
    }

    /// Deepest valid depth: the tree height minus one level for leaf
    /// counting and one for the root wrapper.
    ///
    /// `None` when the root has no children.
    pub fn max_depth(&self) -> Option<usize> {
        self.root_height.checked_sub(2)
    }

    /// Summary counts for choosing depth parameters.
    pub fn stats(&self) -> OutlineStats {
        let mut per_depth = BTreeMap::new();
        for entry in &self.entries {
            *per_depth.entry(entry.depth).or_insert(0) += 1;
        }
        OutlineStats {
            entries: self.entries.len(),
            max_depth: self.max_depth(),
            per_depth,
        }
    }
}

impl<'a> IntoIterator for &'a Flattened {
    type Item = &'a FlatEntry;
    type IntoIter = std::slice::Iter<'a, FlatEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Outline statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineStats {
    /// Number of labeled entries
    pub entries: usize,

    /// Deepest valid depth, if any
    pub max_depth: Option<usize>,

    /// Labeled entry count per depth
    pub per_depth: BTreeMap<usize, usize>,
}

struct Collector<F> {
    entries: Vec<FlatEntry>,
    open: Vec<usize>,
    keep_going: F,
}

impl<F: FnMut() -> bool> OutlineVisitor for Collector<F> {
    fn visit(&mut self, label: &str, depth: usize) -> WalkControl {
        if !(self.keep_going)() {
            return WalkControl::Stop;
        }
        self.open.push(self.entries.len());
        self.entries.push(FlatEntry {
            index: self.entries.len(),
            depth,
            height: 0,
            label: label.to_string(),
        });
        WalkControl::Continue
    }

    fn post_visit(&mut self, _label: &str, _depth: usize, height: usize) {
        if let Some(pos) = self.open.pop() {
            self.entries[pos].height = height;
        }
    }
}

/// Flatten an outline into pre-order entries with depth and height.
pub fn flatten(root: &OutlineNode) -> Flattened {
    flatten_with(root, || true).unwrap_or_default()
}

/// Flatten, polling `keep_going` before each entry.
///
/// Returns `None` if `keep_going` returned false and the walk was abandoned.
pub fn flatten_with<F: FnMut() -> bool>(root: &OutlineNode, keep_going: F) -> Option<Flattened> {
    let mut collector = Collector {
        entries: Vec::new(),
        open: Vec::new(),
        keep_going,
    };
    let summary = walk(root, &mut collector);
    if !summary.completed {
        return None;
    }
    log::debug!(
        "Flattened {} outline entries (tree height {})",
        collector.entries.len(),
        summary.root_height
    );
    Some(Flattened {
        entries: collector.entries,
        root_height: summary.root_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(depth: usize) -> OutlineNode {
        let mut node = OutlineNode::labeled(format!("L{}", depth - 1));
        for d in (0..depth - 1).rev() {
            node = OutlineNode::labeled(format!("L{}", d)).with_child(node);
        }
        OutlineNode::root().with_child(node)
    }

    fn sample() -> OutlineNode {
        OutlineNode::root().with_child(
            OutlineNode::labeled("A").with_child(
                OutlineNode::labeled("B")
                    .with_child(OutlineNode::labeled("C"))
                    .with_child(OutlineNode::labeled("D")),
            ),
        )
    }

    #[test]
    fn test_chain_depths_and_max_depth() {
        for d in 1..=6 {
            let flat = flatten(&chain(d));
            assert_eq!(flat.len(), d);
            let depths: Vec<usize> = flat.iter().map(|e| e.depth).collect();
            assert_eq!(depths, (0..d).collect::<Vec<_>>());
            assert_eq!(flat.max_depth(), Some(d - 1));
        }
    }

    #[test]
    fn test_known_shape_heights() {
        let flat = flatten(&sample());
        let rows: Vec<(&str, usize, usize, usize)> = flat
            .iter()
            .map(|e| (e.label.as_str(), e.index, e.depth, e.height))
            .collect();
        assert_eq!(
            rows,
            vec![("A", 0, 0, 3), ("B", 1, 1, 2), ("C", 2, 2, 1), ("D", 3, 2, 1)]
        );
        assert_eq!(flat.root_height(), 4);
        assert_eq!(flat.max_depth(), Some(2));
    }

    #[test]
    fn test_empty_root() {
        let flat = flatten(&OutlineNode::root());
        assert!(flat.is_empty());
        assert_eq!(flat.max_depth(), None);
    }

    #[test]
    fn test_root_label_ignored_and_unlabeled_nodes_skipped() {
        let mut root = OutlineNode::labeled("wrapper");
        let mut unlabeled = OutlineNode::root();
        unlabeled.add_child(OutlineNode::labeled("deep"));
        root.add_child(OutlineNode::labeled("top"));
        root.add_child(unlabeled);

        let flat = flatten(&root);
        let rows: Vec<(&str, usize, usize)> = flat
            .iter()
            .map(|e| (e.label.as_str(), e.index, e.depth))
            .collect();
        assert_eq!(rows, vec![("top", 0, 0), ("deep", 1, 1)]);
        assert_eq!(flat.max_depth(), Some(1));
    }

    #[test]
    fn test_post_visit_order() {
        #[derive(Default)]
        struct Recorder(Vec<String>);
        impl OutlineVisitor for Recorder {
            fn visit(&mut self, label: &str, _depth: usize) -> WalkControl {
                self.0.push(format!("+{}", label));
                WalkControl::Continue
            }
            fn post_visit(&mut self, label: &str, _depth: usize, height: usize) {
                self.0.push(format!("-{}{}", label, height));
            }
        }

        let mut recorder = Recorder::default();
        let summary = walk(&sample(), &mut recorder);
        assert!(summary.completed);
        assert_eq!(summary.visited, 4);
        assert_eq!(
            recorder.0,
            vec!["+A", "+B", "+C", "-C1", "+D", "-D1", "-B2", "-A3"]
        );
    }

    #[test]
    fn test_stop_abandons_walk() {
        struct StopAt(usize);
        impl OutlineVisitor for StopAt {
            fn visit(&mut self, _label: &str, _depth: usize) -> WalkControl {
                if self.0 == 0 {
                    return WalkControl::Stop;
                }
                self.0 -= 1;
                WalkControl::Continue
            }
        }

        let summary = walk(&sample(), &mut StopAt(2));
        assert!(!summary.completed);
        assert_eq!(summary.visited, 3);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let flat = flatten(&chain(50_000));
        assert_eq!(flat.len(), 50_000);
        assert_eq!(flat.max_depth(), Some(49_999));
    }

    #[test]
    fn test_flatten_with_cancellation() {
        let mut budget = 2;
        let flat = flatten_with(&sample(), || {
            budget -= 1;
            budget >= 0
        });
        assert!(flat.is_none());
        assert!(flatten_with(&sample(), || true).is_some());
    }

    #[test]
    fn test_stats_per_depth() {
        let stats = flatten(&sample()).stats();
        assert_eq!(stats.entries, 4);
        assert_eq!(stats.max_depth, Some(2));
        assert_eq!(stats.per_depth.get(&2), Some(&2));
    }
}
