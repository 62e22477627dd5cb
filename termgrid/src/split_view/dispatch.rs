//! Panel action vocabulary and dispatch
//!
//! Maps the named actions an embedder binds to keyboard shortcuts onto
//! adapter calls. The string forms are stable so keybinding files can
//! refer to them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use termgrid_core::split::{CloseOutcome, NavDirection, SplitDirection};

use super::adapter::SplitViewAdapter;
use super::host::PanelHost;

/// A user-facing panel action, typically bound to a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelAction {
    /// Split the focused panel left/right.
    SplitHorizontal,
    /// Split the focused panel top/bottom.
    SplitVertical,
    /// Close the focused panel.
    ClosePanel,
    /// Move focus to the previous panel.
    FocusUp,
    /// Move focus to the next panel.
    FocusDown,
    /// Move focus to the previous panel.
    FocusLeft,
    /// Move focus to the next panel.
    FocusRight,
}

impl PanelAction {
    /// Returns the stable string form used in keybinding files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SplitHorizontal => "split-horizontal",
            Self::SplitVertical => "split-vertical",
            Self::ClosePanel => "close-panel",
            Self::FocusUp => "focus-up",
            Self::FocusDown => "focus-down",
            Self::FocusLeft => "focus-left",
            Self::FocusRight => "focus-right",
        }
    }
}

impl std::fmt::Display for PanelAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "split-horizontal" => Ok(Self::SplitHorizontal),
            "split-vertical" => Ok(Self::SplitVertical),
            "close-panel" => Ok(Self::ClosePanel),
            "focus-up" => Ok(Self::FocusUp),
            "focus-down" => Ok(Self::FocusDown),
            "focus-left" => Ok(Self::FocusLeft),
            "focus-right" => Ok(Self::FocusRight),
            _ => Err(()),
        }
    }
}

/// Applies an action to the adapter.
///
/// Returns true if the layout or focus changed, so the embedder knows
/// whether to re-sync.
pub fn dispatch<H: PanelHost>(adapter: &mut SplitViewAdapter<H>, action: PanelAction) -> bool {
    match action {
        PanelAction::SplitHorizontal => adapter
            .split_focused(SplitDirection::Horizontal)
            .is_some(),
        PanelAction::SplitVertical => adapter.split_focused(SplitDirection::Vertical).is_some(),
        PanelAction::ClosePanel => !matches!(adapter.close_focused(), CloseOutcome::Ignored),
        PanelAction::FocusUp => adapter.navigate_panel(NavDirection::Up).is_some(),
        PanelAction::FocusDown => adapter.navigate_panel(NavDirection::Down).is_some(),
        PanelAction::FocusLeft => adapter.navigate_panel(NavDirection::Left).is_some(),
        PanelAction::FocusRight => adapter.navigate_panel(NavDirection::Right).is_some(),
    }
}
