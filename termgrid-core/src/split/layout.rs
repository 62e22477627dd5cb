//! Layout compiler: from panel tree to rectangles
//!
//! Derives absolute panel rectangles and splitter-handle geometry from
//! a tree and a container rectangle by recursive descent. At a split,
//! the container is divided along the split's direction at its ratio;
//! the second sub-rectangle is derived by subtraction from the first so
//! the pair tiles the parent exactly, with no floating-point gap.
//!
//! The central correctness property of the whole subsystem lives here:
//! for any tree and container, the leaf rectangles are pairwise
//! disjoint and their union equals the container. Identical inputs
//! always produce identical outputs; there is no hidden state.

use serde::{Deserialize, Serialize};

use super::tree::PanelNode;
use super::types::{NodeId, PanelId, SessionId, SplitDirection};

/// An axis-aligned rectangle.
///
/// The engine works in fractional container coordinates (the unit
/// rectangle), but nothing here assumes a unit; callers may pass pixel
/// rectangles for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl LayoutRect {
    /// The unit container: fractional coordinates covering 0..1.
    pub const UNIT: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the rectangle's area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Divides this rectangle along `direction` at `ratio`.
    ///
    /// The second rectangle is computed by subtracting the first from
    /// the whole, so the pair always tiles `self` exactly.
    #[must_use]
    pub fn divide(&self, direction: SplitDirection, ratio: f64) -> (Self, Self) {
        match direction {
            SplitDirection::Horizontal => {
                let first_width = self.width * ratio;
                let first = Self::new(self.x, self.y, first_width, self.height);
                let second = Self::new(
                    self.x + first_width,
                    self.y,
                    self.width - first_width,
                    self.height,
                );
                (first, second)
            }
            SplitDirection::Vertical => {
                let first_height = self.height * ratio;
                let first = Self::new(self.x, self.y, self.width, first_height);
                let second = Self::new(
                    self.x,
                    self.y + first_height,
                    self.width,
                    self.height - first_height,
                );
                (first, second)
            }
        }
    }
}

/// Computed placement for one leaf panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    /// The leaf's identity. Host instances are keyed by this, never by
    /// position in the output array.
    pub panel: PanelId,
    /// The session displayed in the panel.
    pub session: SessionId,
    /// Assigned rectangle within the container.
    pub rect: LayoutRect,
}

/// Geometry for one draggable splitter handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitterHandle {
    /// The split node this handle resizes.
    pub node: NodeId,
    /// Direction of the split.
    pub direction: SplitDirection,
    /// Position of the dividing line, in container coordinates
    /// (an x coordinate for horizontal splits, a y for vertical).
    pub position: f64,
    /// Rectangle occupied by the split, for positioning and
    /// hit-testing the handle.
    pub bounds: LayoutRect,
}

/// Computes the rectangle assigned to every leaf panel.
///
/// Leaves are emitted in pre-order traversal order.
#[must_use]
pub fn compute_layouts(node: &PanelNode, rect: LayoutRect) -> Vec<PanelLayout> {
    let mut out = Vec::with_capacity(node.panel_count());
    collect_layouts(node, rect, &mut out);
    out
}

fn collect_layouts(node: &PanelNode, rect: LayoutRect, out: &mut Vec<PanelLayout>) {
    match node {
        PanelNode::Leaf(panel) => out.push(PanelLayout {
            panel: panel.id,
            session: panel.session,
            rect,
        }),
        PanelNode::Split(split) => {
            let (first, second) = rect.divide(split.direction, split.ratio);
            collect_layouts(&split.first, first, out);
            collect_layouts(&split.second, second, out);
        }
    }
}

/// Computes the handle geometry for every split node.
#[must_use]
pub fn compute_splitters(node: &PanelNode, rect: LayoutRect) -> Vec<SplitterHandle> {
    let mut out = Vec::new();
    collect_splitters(node, rect, &mut out);
    out
}

fn collect_splitters(node: &PanelNode, rect: LayoutRect, out: &mut Vec<SplitterHandle>) {
    if let PanelNode::Split(split) = node {
        let position = match split.direction {
            SplitDirection::Horizontal => rect.x + rect.width * split.ratio,
            SplitDirection::Vertical => rect.y + rect.height * split.ratio,
        };
        out.push(SplitterHandle {
            node: split.id,
            direction: split.direction,
            position,
            bounds: rect,
        });

        let (first, second) = rect.divide(split.direction, split.ratio);
        collect_splitters(&split.first, first, out);
        collect_splitters(&split.second, second, out);
    }
}
