//! `TermGrid` Core Library
//!
//! This crate provides the UI-toolkit-free core of the `TermGrid`
//! split-pane terminal layout: the panel tree, the layout compiler, the
//! focus and drag controllers, and settings persistence.
//!
//! # Crate Structure
//!
//! - [`split`] - Panel tree, layout engine, drag controller
//! - [`settings`] - Layout tunables and persistence
//! - [`tracing`] - Structured logging setup
//!
//! The toolkit adapter lives in the `termgrid` crate; everything here
//! is deterministic and testable without a display.

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod settings;
pub mod split;
pub mod tracing;

pub use settings::{LayoutSettings, SettingsError};
pub use split::{
    CloseOutcome, DragController, IdSource, LayoutRect, LeafPanel, NavDirection, NodeId, PanelId,
    PanelLayout, PanelNode, RatioUpdate, ResizeCursor, SessionId, SplitDirection, SplitError,
    SplitLayoutEngine, SplitterHandle,
};
