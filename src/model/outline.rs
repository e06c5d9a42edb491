//! Document outline (bookmarks) stored as an arena of nodes.

use serde::{Deserialize, Serialize};

use super::PageId;

/// Where a bookmark points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// A page object in the source file
    Page(PageId),
    /// A zero-based page index, as written by some producers
    Index(u32),
}

/// One node of the outline tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Bookmark title
    pub title: String,

    /// Target of the bookmark, if one could be read
    pub target: Option<Destination>,

    /// Index of the parent node (None for top-level items)
    pub parent: Option<usize>,

    /// Indices of child nodes, in document order
    pub children: Vec<usize>,
}

/// A bookmark after flattening, in preorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    /// Bookmark title
    pub title: String,

    /// Target of the bookmark
    pub target: Option<Destination>,

    /// Nesting level (0 = top level)
    pub level: u8,
}

/// Document outline.
///
/// Nodes live in a flat vector and refer to each other by index, so the
/// tree never owns itself recursively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outline {
    nodes: Vec<OutlineNode>,
    roots: Vec<usize>,
}

impl Outline {
    /// Create a new empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level item and return its index.
    pub fn push_root(&mut self, title: impl Into<String>, target: Option<Destination>) -> usize {
        let index = self.push_node(title.into(), target, None);
        self.roots.push(index);
        index
    }

    /// Append a child under `parent` and return its index.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a node of this outline.
    pub fn push_child(
        &mut self,
        parent: usize,
        title: impl Into<String>,
        target: Option<Destination>,
    ) -> usize {
        let index = self.push_node(title.into(), target, Some(parent));
        self.nodes[parent].children.push(index);
        index
    }

    fn push_node(&mut self, title: String, target: Option<Destination>, parent: Option<usize>) -> usize {
        self.nodes.push(OutlineNode {
            title,
            target,
            parent,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// Check if the outline is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the total number of items (including nested).
    pub fn total_items(&self) -> usize {
        self.nodes.len()
    }

    /// Flatten the tree in preorder: every parent is immediately followed by
    /// its children, siblings stay in document order.
    pub fn flatten(&self) -> Vec<Bookmark> {
        let mut flat = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, u8)> = self.roots.iter().rev().map(|&i| (i, 0)).collect();

        while let Some((index, level)) = stack.pop() {
            let node = &self.nodes[index];
            flat.push(Bookmark {
                title: node.title.clone(),
                target: node.target,
                level,
            });
            stack.extend(node.children.iter().rev().map(|&c| (c, level.saturating_add(1))));
        }

        flat
    }
}
