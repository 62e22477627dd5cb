//! Split view adapter layer
//!
//! Connects the pure layout engine in `termgrid-core` to a UI toolkit:
//! [`SplitViewAdapter`] drives one layout, [`HostRegistry`] keeps panel
//! widgets alive across layout changes, and [`PanelAction`] names the
//! operations an embedder binds to shortcuts.

pub mod adapter;
pub mod dispatch;
pub mod host;

pub use adapter::{NoopLock, PointerLock, SplitViewAdapter};
pub use dispatch::{dispatch, PanelAction};
pub use host::{HostRegistry, PanelHost, ReconcileStats};
