//! Page tree produced by a crawl

use crate::extract::Product;
use serde::{Deserialize, Serialize};

/// Result of crawling one URL
///
/// Children are owned by their parent's `subpages`, in link-discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageNode {
    /// Document title
    pub title: String,

    /// Final URL after redirects
    pub url: String,

    /// Normalized text fragments in pre-order
    pub content: Vec<String>,

    /// Same-host links discovered on the page, deduplicated in document order
    ///
    /// Empty for pages at the depth limit, where discovery does not run.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,

    /// Product cards found on the page
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,

    /// Successfully crawled same-host children
    #[serde(default)]
    pub subpages: Vec<PageNode>,
}

impl PageNode {
    /// Iterates over this node and all of its descendants in pre-order
    pub fn iter(&self) -> impl Iterator<Item = &PageNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.subpages.iter().rev());
            Some(node)
        })
    }

    /// URLs of every node in the tree, in pre-order
    pub fn urls(&self) -> Vec<&str> {
        self.iter().map(|node| node.url.as_str()).collect()
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false: a tree holds at least its root
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Nesting depth of the deepest descendant (0 for a leaf)
    pub fn height(&self) -> u32 {
        self.subpages
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }
}
