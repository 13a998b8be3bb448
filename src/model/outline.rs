//! Outline (table of contents) tree types.

use serde::{Deserialize, Serialize};

/// A node in a document outline.
///
/// The root of an outline is a structural wrapper: it normally has no
/// label and its children are the top-level bookmarks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Bookmark title, if the source provides one
    pub label: Option<String>,

    /// Target page number (1-indexed)
    pub page: Option<u32>,

    /// Child nodes in display order
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create an unlabeled root wrapper.
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a labeled node with no children.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            page: None,
            children: Vec::new(),
        }
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: OutlineNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style target page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Add a child node.
    pub fn add_child(&mut self, child: OutlineNode) {
        self.children.push(child);
    }

    /// Check if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of descendants (the node itself is not counted).
    pub fn total_items(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&OutlineNode> = vec![self];
        while let Some(node) = stack.pop() {
            count += node.children.len();
            stack.extend(node.children.iter());
        }
        count
    }
}

// Drop children iteratively; the derived drop recurses once per level.
impl Drop for OutlineNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Outline read from a PDF, together with the document title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfOutline {
    /// Document title from the info dictionary
    pub title: Option<String>,

    /// Structural root; its children are the top-level bookmarks
    pub root: OutlineNode,
}

impl PdfOutline {
    /// Check if the outline has no bookmarks.
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_builder() {
        let root = OutlineNode::root().with_child(
            OutlineNode::labeled("Chapter 1")
                .with_page(1)
                .with_child(OutlineNode::labeled("Section 1.1").with_page(2))
                .with_child(OutlineNode::labeled("Section 1.2").with_page(5)),
        );

        assert_eq!(root.total_items(), 3);
        assert!(root.label.is_none());
        assert_eq!(root.children[0].page, Some(1));
        assert!(root.children[0].children[1].is_leaf());
    }

    #[test]
    fn test_pdf_outline_empty() {
        let outline = PdfOutline::default();
        assert!(outline.is_empty());
    }
}
