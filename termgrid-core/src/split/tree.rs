//! Panel tree structure for split layouts
//!
//! This module provides the binary tree representing the current split
//! configuration. Each node is either a leaf panel (bound to one
//! session) or a split node (two children divided along a direction at
//! a ratio).
//!
//! # Tree Structure
//!
//! ```text
//! Split(Horizontal, 0.5)
//! ├── Leaf(A, session_1)
//! └── Split(Vertical, 0.5)
//!     ├── Leaf(B, session_2)
//!     └── Leaf(C, session_3)
//! ```
//!
//! # Purity
//!
//! All mutations are pure: they take `&self` and return a new tree,
//! leaving the input untouched. A miss (unknown target ID) is reported
//! through the return value so the caller can treat it as a no-op.

use super::types::{NodeId, PanelId, SessionId, SplitDirection};

/// Default ratio for a freshly created split (50% of available space).
pub const DEFAULT_SPLIT_RATIO: f64 = 0.5;

/// Default minimum fraction of the container a panel may occupy.
///
/// Ratios are clamped to `[min, 1 - min]` so no panel can be dragged
/// or programmed down to zero area.
pub const MIN_PANEL_FRACTION: f64 = 0.1;

/// A node in the panel tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelNode {
    /// A leaf panel displaying one session.
    Leaf(LeafPanel),
    /// A split dividing its rectangle between two children.
    Split(SplitNode),
}

/// A leaf panel in the tree.
///
/// The session reference is immutable once the leaf is created;
/// splitting keeps the original leaf's ID and session attached to the
/// preserved child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafPanel {
    /// Unique identifier for this panel.
    pub id: PanelId,
    /// Session displayed in this panel.
    pub session: SessionId,
}

impl LeafPanel {
    /// Creates a leaf panel with the given identity and session.
    #[must_use]
    pub const fn new(id: PanelId, session: SessionId) -> Self {
        Self { id, session }
    }
}

/// A split node containing two children.
///
/// `Horizontal` arranges the children left/right (dividing width),
/// `Vertical` arranges them top/bottom (dividing height). `ratio` is
/// the fraction of space allocated to the first child.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitNode {
    /// Unique identifier for this split, used by splitter handles and
    /// ratio updates.
    pub id: NodeId,
    /// Split direction.
    pub direction: SplitDirection,
    /// Fraction of space allocated to the first child.
    pub ratio: f64,
    /// First child (left for horizontal, top for vertical).
    pub first: Box<PanelNode>,
    /// Second child (right for horizontal, bottom for vertical).
    pub second: Box<PanelNode>,
}

impl SplitNode {
    /// Creates a split node with the default ratio.
    #[must_use]
    pub fn new(id: NodeId, direction: SplitDirection, first: PanelNode, second: PanelNode) -> Self {
        Self {
            id,
            direction,
            ratio: DEFAULT_SPLIT_RATIO,
            first: Box::new(first),
            second: Box::new(second),
        }
    }
}

/// Result of a pure panel removal.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    /// The panel was not found; the caller keeps the original tree.
    NotFound,
    /// The node itself was the panel to remove. At the root this means
    /// the layout is now empty and the host must be told "all closed".
    RemovedSelf(LeafPanel),
    /// The panel was removed; its former sibling subtree took the
    /// parent split's place in the returned tree.
    Removed {
        /// The contracted tree.
        tree: PanelNode,
        /// The leaf that was removed.
        removed: LeafPanel,
    },
}

impl RemoveOutcome {
    /// Returns the removed leaf, if the panel was found.
    #[must_use]
    pub const fn removed(&self) -> Option<&LeafPanel> {
        match self {
            Self::NotFound => None,
            Self::RemovedSelf(leaf) | Self::Removed { removed: leaf, .. } => Some(leaf),
        }
    }
}

impl PanelNode {
    /// Creates a leaf node.
    #[must_use]
    pub const fn leaf(panel: LeafPanel) -> Self {
        Self::Leaf(panel)
    }

    /// Creates a split node with the default ratio.
    #[must_use]
    pub fn split(id: NodeId, direction: SplitDirection, first: Self, second: Self) -> Self {
        Self::Split(SplitNode::new(id, direction, first, second))
    }

    /// Returns true if this is a leaf node.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns true if this is a split node.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        matches!(self, Self::Split(_))
    }

    /// Returns the leaf panel if this is a leaf node.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&LeafPanel> {
        match self {
            Self::Leaf(panel) => Some(panel),
            Self::Split(_) => None,
        }
    }

    /// Returns the split node if this is a split node.
    #[must_use]
    pub const fn as_split(&self) -> Option<&SplitNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Split(split) => Some(split),
        }
    }

    // ========================================================================
    // Tree Traversal
    // ========================================================================

    /// Finds a leaf panel by its ID.
    #[must_use]
    pub fn find_panel(&self, panel_id: PanelId) -> Option<&LeafPanel> {
        match self {
            Self::Leaf(panel) => (panel.id == panel_id).then_some(panel),
            Self::Split(split) => split
                .first
                .find_panel(panel_id)
                .or_else(|| split.second.find_panel(panel_id)),
        }
    }

    /// Finds a split node by its ID.
    #[must_use]
    pub fn find_split(&self, node_id: NodeId) -> Option<&SplitNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Split(split) => {
                if split.id == node_id {
                    Some(split)
                } else {
                    split
                        .first
                        .find_split(node_id)
                        .or_else(|| split.second.find_split(node_id))
                }
            }
        }
    }

    /// Returns all leaves in pre-order (depth-first, first child before
    /// second). This is the order used for focus resolution and cyclic
    /// navigation.
    #[must_use]
    pub fn leaves(&self) -> Vec<&LeafPanel> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a LeafPanel>) {
        match self {
            Self::Leaf(panel) => out.push(panel),
            Self::Split(split) => {
                split.first.collect_leaves(out);
                split.second.collect_leaves(out);
            }
        }
    }

    /// Returns all panel IDs in pre-order traversal order.
    #[must_use]
    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.leaves().iter().map(|leaf| leaf.id).collect()
    }

    /// Returns the first leaf panel in pre-order (leftmost/topmost).
    #[must_use]
    pub fn first_panel(&self) -> &LeafPanel {
        match self {
            Self::Leaf(panel) => panel,
            Self::Split(split) => split.first.first_panel(),
        }
    }

    /// Returns true if the tree contains a panel with the given ID.
    #[must_use]
    pub fn contains_panel(&self, panel_id: PanelId) -> bool {
        self.find_panel(panel_id).is_some()
    }

    /// Returns the total number of leaf panels in the tree.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Split(split) => split.first.panel_count() + split.second.panel_count(),
        }
    }

    /// Returns the depth of the tree. A single leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Split(split) => 1 + split.first.depth().max(split.second.depth()),
        }
    }

    // ========================================================================
    // Pure Mutations
    // ========================================================================

    /// Splits the leaf with `target` in the given direction, returning
    /// the new tree.
    ///
    /// The target leaf is replaced by a split node whose first child is
    /// the original leaf (ID and session preserved) and whose second
    /// child is `new_leaf`, at the default 0.5 ratio.
    ///
    /// Returns `None` if `target` is not in the tree; the caller treats
    /// that as a no-op and keeps the original.
    #[must_use]
    pub fn split_panel(
        &self,
        target: PanelId,
        direction: SplitDirection,
        new_leaf: LeafPanel,
        split_id: NodeId,
    ) -> Option<Self> {
        match self {
            Self::Leaf(panel) => (panel.id == target).then(|| {
                Self::split(split_id, direction, Self::Leaf(*panel), Self::Leaf(new_leaf))
            }),
            Self::Split(split) => {
                if let Some(first) = split.first.split_panel(target, direction, new_leaf, split_id)
                {
                    Some(Self::Split(SplitNode {
                        first: Box::new(first),
                        second: split.second.clone(),
                        ..*split
                    }))
                } else {
                    split
                        .second
                        .split_panel(target, direction, new_leaf, split_id)
                        .map(|second| {
                            Self::Split(SplitNode {
                                first: split.first.clone(),
                                second: Box::new(second),
                                ..*split
                            })
                        })
                }
            }
        }
    }

    /// Removes the leaf with `target`, returning the contracted tree.
    ///
    /// When the removed leaf is a child of a split, the sibling subtree
    /// moves up to take the parent's former position. When the tree is
    /// a single matching leaf, `RemovedSelf` is returned and the caller
    /// must treat the layout as fully closed.
    #[must_use]
    pub fn remove_panel(&self, target: PanelId) -> RemoveOutcome {
        match self {
            Self::Leaf(panel) => {
                if panel.id == target {
                    RemoveOutcome::RemovedSelf(*panel)
                } else {
                    RemoveOutcome::NotFound
                }
            }
            Self::Split(split) => match split.first.remove_panel(target) {
                RemoveOutcome::RemovedSelf(removed) => RemoveOutcome::Removed {
                    tree: (*split.second).clone(),
                    removed,
                },
                RemoveOutcome::Removed { tree, removed } => RemoveOutcome::Removed {
                    tree: Self::Split(SplitNode {
                        first: Box::new(tree),
                        second: split.second.clone(),
                        ..*split
                    }),
                    removed,
                },
                RemoveOutcome::NotFound => match split.second.remove_panel(target) {
                    RemoveOutcome::RemovedSelf(removed) => RemoveOutcome::Removed {
                        tree: (*split.first).clone(),
                        removed,
                    },
                    RemoveOutcome::Removed { tree, removed } => RemoveOutcome::Removed {
                        tree: Self::Split(SplitNode {
                            first: split.first.clone(),
                            second: Box::new(tree),
                            ..*split
                        }),
                        removed,
                    },
                    RemoveOutcome::NotFound => RemoveOutcome::NotFound,
                },
            },
        }
    }

    /// Replaces the ratio of the split with `node`, clamped to
    /// `[min_ratio, 1 - min_ratio]`, returning the new tree.
    ///
    /// Returns `None` if no split with that ID exists; the caller
    /// treats that as a no-op.
    #[must_use]
    pub fn with_ratio(&self, node: NodeId, ratio: f64, min_ratio: f64) -> Option<Self> {
        match self {
            Self::Leaf(_) => None,
            Self::Split(split) => {
                if split.id == node {
                    Some(Self::Split(SplitNode {
                        ratio: ratio.clamp(min_ratio, 1.0 - min_ratio),
                        first: split.first.clone(),
                        second: split.second.clone(),
                        ..*split
                    }))
                } else if let Some(first) = split.first.with_ratio(node, ratio, min_ratio) {
                    Some(Self::Split(SplitNode {
                        first: Box::new(first),
                        second: split.second.clone(),
                        ..*split
                    }))
                } else {
                    split.second.with_ratio(node, ratio, min_ratio).map(|second| {
                        Self::Split(SplitNode {
                            first: split.first.clone(),
                            second: Box::new(second),
                            ..*split
                        })
                    })
                }
            }
        }
    }
}
