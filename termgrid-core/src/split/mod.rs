//! Recursive split-pane layout engine
//!
//! Panels live in a binary tree: every leaf shows one session, every
//! internal node splits its rectangle between two children along a
//! direction at a ratio. The engine compiles that tree plus a container
//! rectangle into a gapless, non-overlapping set of panel rectangles
//! and a set of draggable splitter handles.
//!
//! The pieces:
//! - [`tree`]: the [`PanelNode`] tree and its pure mutations
//! - [`layout`]: the tree-to-rectangles compiler
//! - [`engine`]: [`SplitLayoutEngine`], tying tree, focus, and IDs
//!   together behind one mutation surface
//! - [`drag`]: [`DragController`], turning pointer gestures into
//!   per-frame ratio updates
//!
//! # Example
//!
//! ```
//! use termgrid_core::split::{SessionId, SplitDirection, SplitLayoutEngine};
//!
//! let mut engine = SplitLayoutEngine::with_session(SessionId::new());
//! let right = engine.split_focused(SplitDirection::Horizontal).unwrap();
//! assert_eq!(engine.panel_count(), 2);
//! assert_eq!(engine.focused_panel(), Some(right));
//!
//! let layouts = engine.layouts();
//! assert!((layouts[0].rect.width - 0.5).abs() < f64::EPSILON);
//! ```

pub mod drag;
pub mod engine;
pub mod error;
pub mod layout;
pub mod tree;
pub mod types;

pub use drag::{DragController, RatioUpdate, ResizeCursor};
pub use engine::{CloseOutcome, SplitLayoutEngine};
pub use error::SplitError;
pub use layout::{compute_layouts, compute_splitters, LayoutRect, PanelLayout, SplitterHandle};
pub use tree::{
    LeafPanel, PanelNode, RemoveOutcome, SplitNode, DEFAULT_SPLIT_RATIO, MIN_PANEL_FRACTION,
};
pub use types::{IdSource, NavDirection, NodeId, PanelId, SessionId, SplitDirection};
