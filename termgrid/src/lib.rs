//! `TermGrid` adapter library
//!
//! Binds the `termgrid-core` layout engine to toolkit-side panel
//! hosts. This crate stays toolkit-agnostic: widgets implement
//! [`split_view::PanelHost`], pointer capture implements
//! [`split_view::PointerLock`], and everything else is plain state the
//! embedder drives from its event loop.

#![warn(missing_docs)]

pub mod split_view;

pub use split_view::{
    dispatch, HostRegistry, NoopLock, PanelAction, PanelHost, PointerLock, ReconcileStats,
    SplitViewAdapter,
};
