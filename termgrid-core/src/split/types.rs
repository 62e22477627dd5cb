//! Core type definitions for the split layout engine
//!
//! This module contains the identifier types and enums used throughout
//! the split layout system, plus the id generator that mints them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a leaf panel within a split layout.
///
/// Each panel has a unique ID that persists throughout its lifetime,
/// even as the tree structure around it changes. The hosting
/// environment keys its long-lived widgets by this ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PanelId(pub Uuid);

impl PanelId {
    /// Creates a new random panel ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PanelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Panel({})", self.0)
    }
}

/// Unique identifier for a split node within the panel tree.
///
/// Splitter handles and ratio updates address split nodes by this ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Creates a new random node ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Unique identifier for the session displayed in a panel.
///
/// A session reference is bound to its leaf when the leaf is created
/// and never changes for the leaf's lifetime, so a session-management
/// collaborator sees a stable 1:1 mapping between panel and session
/// across every relayout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Creates a new random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

/// Split direction for dividing a panel.
///
/// When a panel is split, its rectangle is divided into two child
/// rectangles: horizontally (left/right, dividing width) or vertically
/// (top/bottom, dividing height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitDirection {
    /// Split horizontally, creating left and right panels.
    Horizontal,
    /// Split vertically, creating top and bottom panels.
    Vertical,
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "Horizontal"),
            Self::Vertical => write!(f, "Vertical"),
        }
    }
}

/// Direction for panel focus navigation.
///
/// Navigation is a cyclic walk over the leaves in pre-order traversal
/// order: `Left` and `Up` move to the previous leaf, `Right` and `Down`
/// to the next, both wrapping at the ends. The direction name selects
/// the wrap direction only; this is not a 2D nearest-neighbor search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    /// Previous leaf in pre-order (wraps to the last).
    Up,
    /// Next leaf in pre-order (wraps to the first).
    Down,
    /// Previous leaf in pre-order (wraps to the last).
    Left,
    /// Next leaf in pre-order (wraps to the first).
    Right,
}

impl NavDirection {
    /// Returns true if this direction moves to the previous leaf.
    #[must_use]
    pub const fn is_backward(self) -> bool {
        matches!(self, Self::Up | Self::Left)
    }
}

/// Generator for panel, node, and session IDs.
///
/// Each engine instance owns its generator, so independent engines
/// (e.g. one per window) cannot collide. Tests use [`IdSource::sequence`]
/// to get deterministic, reproducible IDs.
#[derive(Debug, Clone)]
pub enum IdSource {
    /// Random v4 UUIDs (production default).
    Random,
    /// Deterministic UUIDs from a monotonic counter (tests).
    Sequence {
        /// Next counter value to mint.
        next: u128,
    },
}

impl IdSource {
    /// Creates a random id source.
    #[must_use]
    pub const fn random() -> Self {
        Self::Random
    }

    /// Creates a deterministic id source counting up from 1.
    #[must_use]
    pub const fn sequence() -> Self {
        Self::Sequence { next: 1 }
    }

    /// Mints the next raw UUID.
    pub fn next_uuid(&mut self) -> Uuid {
        match self {
            Self::Random => Uuid::new_v4(),
            Self::Sequence { next } => {
                let uuid = Uuid::from_u128(*next);
                *next += 1;
                uuid
            }
        }
    }

    /// Mints a new panel ID.
    pub fn panel_id(&mut self) -> PanelId {
        PanelId(self.next_uuid())
    }

    /// Mints a new split node ID.
    pub fn node_id(&mut self) -> NodeId {
        NodeId(self.next_uuid())
    }

    /// Mints a new session ID.
    pub fn session_id(&mut self) -> SessionId {
        SessionId(self.next_uuid())
    }
}

impl Default for IdSource {
    fn default() -> Self {
        Self::random()
    }
}
