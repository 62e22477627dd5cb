//! Split layout engine: tree, focus, and layout in one place
//!
//! [`SplitLayoutEngine`] owns the panel tree (or `None` once every
//! panel has been closed), the focused panel, and the ID source. All
//! mutations go through it so the focus invariant holds at every
//! observable point: whenever the tree is non-empty, exactly one of its
//! leaves is focused.
//!
//! Mutations targeting stale IDs degrade to no-ops. A close request for
//! a panel that was already closed, or a ratio update for a split that
//! was contracted away mid-drag, leaves the engine unchanged rather
//! than erroring, because such races are routine when UI events queue
//! up behind each other.

use tracing::debug;

use super::error::SplitError;
use super::layout::{compute_layouts, compute_splitters, LayoutRect, PanelLayout, SplitterHandle};
use super::tree::{LeafPanel, PanelNode, RemoveOutcome, DEFAULT_SPLIT_RATIO};
use super::types::{IdSource, NavDirection, NodeId, PanelId, SessionId, SplitDirection};
use crate::settings::LayoutSettings;

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The panel was not present; nothing changed.
    Ignored,
    /// The panel was closed and the layout still has panels.
    Closed {
        /// The panel that was closed.
        panel: PanelId,
        /// The session that panel displayed, for the embedder to
        /// disconnect.
        session: SessionId,
        /// The panel holding focus after the close.
        focus: PanelId,
    },
    /// The last panel was closed; the layout is now empty. Reported
    /// exactly once per emptying.
    AllClosed {
        /// The panel that was closed.
        panel: PanelId,
        /// The session that panel displayed.
        session: SessionId,
    },
}

/// The split layout engine.
///
/// Created with one panel showing an initial session; splits, closes,
/// ratio updates, and focus moves flow through its methods, and
/// [`layouts`](Self::layouts) / [`splitters`](Self::splitters) compile
/// the current tree to geometry on demand.
#[derive(Debug, Clone)]
pub struct SplitLayoutEngine {
    root: Option<PanelNode>,
    focused: Option<PanelId>,
    ids: IdSource,
    settings: LayoutSettings,
}

impl SplitLayoutEngine {
    /// Creates an engine with a single focused panel showing `session`,
    /// random IDs, and default settings.
    #[must_use]
    pub fn with_session(session: SessionId) -> Self {
        Self::configured(session, LayoutSettings::default(), IdSource::random())
    }

    /// Creates an engine with explicit settings and ID source.
    ///
    /// A sequential [`IdSource`] makes every ID in a test run
    /// predictable.
    #[must_use]
    pub fn configured(session: SessionId, settings: LayoutSettings, mut ids: IdSource) -> Self {
        let panel = LeafPanel::new(ids.panel_id(), session);
        Self {
            root: Some(PanelNode::leaf(panel)),
            focused: Some(panel.id),
            ids,
            settings,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the current tree, or `None` if every panel was closed.
    #[must_use]
    pub const fn root(&self) -> Option<&PanelNode> {
        self.root.as_ref()
    }

    /// Returns true once every panel has been closed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the focused panel, or `None` when the layout is empty.
    #[must_use]
    pub const fn focused_panel(&self) -> Option<PanelId> {
        self.focused
    }

    /// Returns the number of open panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.root.as_ref().map_or(0, PanelNode::panel_count)
    }

    /// Returns all panel IDs in pre-order.
    #[must_use]
    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.root.as_ref().map_or_else(Vec::new, PanelNode::panel_ids)
    }

    /// Returns the session displayed in the given panel.
    #[must_use]
    pub fn session_of(&self, panel: PanelId) -> Option<SessionId> {
        self.root
            .as_ref()
            .and_then(|root| root.find_panel(panel))
            .map(|leaf| leaf.session)
    }

    /// Returns the configured minimum panel fraction.
    #[must_use]
    pub const fn min_ratio(&self) -> f64 {
        self.settings.min_panel_fraction
    }

    /// Returns the engine's settings.
    #[must_use]
    pub const fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Compiles panel rectangles for the unit container.
    #[must_use]
    pub fn layouts(&self) -> Vec<PanelLayout> {
        self.layouts_in(LayoutRect::UNIT)
    }

    /// Compiles panel rectangles for an arbitrary container.
    #[must_use]
    pub fn layouts_in(&self, rect: LayoutRect) -> Vec<PanelLayout> {
        self.root
            .as_ref()
            .map_or_else(Vec::new, |root| compute_layouts(root, rect))
    }

    /// Compiles splitter handles for the unit container.
    #[must_use]
    pub fn splitters(&self) -> Vec<SplitterHandle> {
        self.splitters_in(LayoutRect::UNIT)
    }

    /// Compiles splitter handles for an arbitrary container.
    #[must_use]
    pub fn splitters_in(&self, rect: LayoutRect) -> Vec<SplitterHandle> {
        self.root
            .as_ref()
            .map_or_else(Vec::new, |root| compute_splitters(root, rect))
    }

    // ========================================================================
    // Splitting
    // ========================================================================

    /// Splits the focused panel, minting a fresh session for the new
    /// panel.
    ///
    /// Returns the new panel's ID, which also receives focus, or `None`
    /// if the layout is empty.
    pub fn split_focused(&mut self, direction: SplitDirection) -> Option<PanelId> {
        let target = self.focused?;
        self.split_panel(target, direction, None)
    }

    /// Splits the focused panel, attaching the given session to the
    /// new panel instead of minting one.
    pub fn split_focused_with(
        &mut self,
        direction: SplitDirection,
        session: SessionId,
    ) -> Option<PanelId> {
        let target = self.focused?;
        self.split_panel(target, direction, Some(session))
    }

    /// Splits the panel with `target` in the given direction.
    ///
    /// The original panel keeps its ID and session on the first side;
    /// the new panel lands on the second side at the configured default
    /// ratio and receives focus. Pass `session` to attach an existing
    /// session to the new panel; `None` mints a fresh one.
    ///
    /// Returns `None` without changes if `target` is not present.
    pub fn split_panel(
        &mut self,
        target: PanelId,
        direction: SplitDirection,
        session: Option<SessionId>,
    ) -> Option<PanelId> {
        let root = self.root.as_ref()?;
        let new_leaf = LeafPanel::new(
            self.ids.panel_id(),
            session.unwrap_or_else(|| self.ids.session_id()),
        );
        let split_id = self.ids.node_id();

        let mut tree = root.split_panel(target, direction, new_leaf, split_id)?;
        if (self.settings.default_split_ratio - DEFAULT_SPLIT_RATIO).abs() > f64::EPSILON {
            if let Some(adjusted) = tree.with_ratio(
                split_id,
                self.settings.default_split_ratio,
                self.settings.min_panel_fraction,
            ) {
                tree = adjusted;
            }
        }

        debug!(
            panel = %target,
            new_panel = %new_leaf.id,
            direction = %direction,
            "panel split"
        );
        self.root = Some(tree);
        self.focused = Some(new_leaf.id);
        Some(new_leaf.id)
    }

    // ========================================================================
    // Closing
    // ========================================================================

    /// Closes the focused panel.
    pub fn close_focused(&mut self) -> CloseOutcome {
        match self.focused {
            Some(panel) => self.close_panel(panel),
            None => CloseOutcome::Ignored,
        }
    }

    /// Closes the panel with `panel`.
    ///
    /// The sibling subtree absorbs the freed space. If the closed panel
    /// held focus, focus moves to the first remaining panel in
    /// pre-order. Closing the last panel empties the layout and reports
    /// [`CloseOutcome::AllClosed`]; any later close request is
    /// [`CloseOutcome::Ignored`].
    pub fn close_panel(&mut self, panel: PanelId) -> CloseOutcome {
        let Some(root) = self.root.as_ref() else {
            return CloseOutcome::Ignored;
        };
        match root.remove_panel(panel) {
            RemoveOutcome::NotFound => CloseOutcome::Ignored,
            RemoveOutcome::RemovedSelf(removed) => {
                debug!(panel = %removed.id, "last panel closed");
                self.root = None;
                self.focused = None;
                CloseOutcome::AllClosed {
                    panel: removed.id,
                    session: removed.session,
                }
            }
            RemoveOutcome::Removed { tree, removed } => {
                let focus = if self.focused == Some(removed.id) {
                    tree.first_panel().id
                } else {
                    // Focused panel survived; keep it.
                    self.focused.unwrap_or_else(|| tree.first_panel().id)
                };
                debug!(panel = %removed.id, focus = %focus, "panel closed");
                self.root = Some(tree);
                self.focused = Some(focus);
                CloseOutcome::Closed {
                    panel: removed.id,
                    session: removed.session,
                    focus,
                }
            }
        }
    }

    // ========================================================================
    // Focus
    // ========================================================================

    /// Sets focus to the given panel.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::PanelNotFound`] if the panel is not in the
    /// layout.
    pub fn set_focus(&mut self, panel: PanelId) -> Result<(), SplitError> {
        let present = self
            .root
            .as_ref()
            .is_some_and(|root| root.contains_panel(panel));
        if present {
            self.focused = Some(panel);
            Ok(())
        } else {
            Err(SplitError::PanelNotFound(panel))
        }
    }

    /// Moves focus to the neighboring panel in the flattened pre-order
    /// list, wrapping at both ends.
    ///
    /// `Up` and `Left` step backward, `Down` and `Right` forward. This
    /// is list traversal, not geometric navigation. A layout with fewer
    /// than two panels is left unchanged.
    ///
    /// Returns the newly focused panel, or `None` when nothing moved.
    pub fn navigate(&mut self, direction: NavDirection) -> Option<PanelId> {
        let root = self.root.as_ref()?;
        let order = root.panel_ids();
        if order.len() < 2 {
            return None;
        }
        let current = self.focused?;
        let index = order.iter().position(|&id| id == current)?;

        let next = if direction.is_backward() {
            (index + order.len() - 1) % order.len()
        } else {
            (index + 1) % order.len()
        };
        let target = order[next];
        debug!(from = %current, to = %target, "focus moved");
        self.focused = Some(target);
        Some(target)
    }

    // ========================================================================
    // Resizing
    // ========================================================================

    /// Replaces the ratio of the split with `node`, clamped to the
    /// configured range.
    ///
    /// Returns false without changes when no such split exists, which
    /// happens when a close contracts the split away mid-drag.
    pub fn update_ratio(&mut self, node: NodeId, ratio: f64) -> bool {
        let Some(root) = self.root.as_ref() else {
            return false;
        };
        match root.with_ratio(node, ratio, self.settings.min_panel_fraction) {
            Some(tree) => {
                self.root = Some(tree);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SplitLayoutEngine {
        let mut ids = IdSource::sequence();
        let session = ids.session_id();
        SplitLayoutEngine::configured(session, LayoutSettings::default(), ids)
    }

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn new_engine_has_one_focused_panel() {
        let engine = engine();
        assert_eq!(engine.panel_count(), 1);
        assert!(!engine.is_empty());
        assert_eq!(engine.focused_panel(), Some(engine.panel_ids()[0]));
    }

    #[test]
    fn single_panel_fills_the_container() {
        let engine = engine();
        let layouts = engine.layouts();
        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].rect, LayoutRect::UNIT);
        assert!(engine.splitters().is_empty());
    }

    // ========================================================================
    // Splitting
    // ========================================================================

    #[test]
    fn split_focused_adds_panel_and_moves_focus() {
        let mut engine = engine();
        let original = engine.focused_panel().unwrap();

        let new_panel = engine.split_focused(SplitDirection::Horizontal).unwrap();
        assert_eq!(engine.panel_count(), 2);
        assert_ne!(new_panel, original);
        assert_eq!(engine.focused_panel(), Some(new_panel));
    }

    #[test]
    fn split_preserves_original_session() {
        let mut engine = engine();
        let original = engine.focused_panel().unwrap();
        let session = engine.session_of(original).unwrap();

        engine.split_focused(SplitDirection::Vertical).unwrap();
        assert_eq!(engine.session_of(original), Some(session));
    }

    #[test]
    fn split_mints_distinct_session_for_new_panel() {
        let mut engine = engine();
        let original = engine.focused_panel().unwrap();
        let new_panel = engine.split_focused(SplitDirection::Horizontal).unwrap();

        assert_ne!(engine.session_of(new_panel), engine.session_of(original));
    }

    #[test]
    fn split_focused_with_attaches_given_session() {
        let mut engine = engine();
        let session = SessionId::new();
        let new_panel = engine
            .split_focused_with(SplitDirection::Horizontal, session)
            .unwrap();

        assert_eq!(engine.session_of(new_panel), Some(session));
    }

    #[test]
    fn split_unknown_panel_is_a_noop() {
        let mut engine = engine();
        let before = engine.panel_ids();

        let result = engine.split_panel(PanelId::new(), SplitDirection::Vertical, None);
        assert!(result.is_none());
        assert_eq!(engine.panel_ids(), before);
    }

    #[test]
    fn split_honors_configured_default_ratio() {
        let mut ids = IdSource::sequence();
        let session = ids.session_id();
        let settings = LayoutSettings {
            default_split_ratio: 0.3,
            ..LayoutSettings::default()
        };
        let mut engine = SplitLayoutEngine::configured(session, settings, ids);

        engine.split_focused(SplitDirection::Horizontal).unwrap();
        let split = engine.root().unwrap().as_split().unwrap();
        assert!((split.ratio - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn repeated_splits_keep_ids_unique() {
        let mut engine = engine();
        for _ in 0..5 {
            engine.split_focused(SplitDirection::Horizontal).unwrap();
        }
        let mut ids = engine.panel_ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    // ========================================================================
    // Closing
    // ========================================================================

    #[test]
    fn close_focused_promotes_sibling_and_refocuses() {
        let mut engine = engine();
        let original = engine.focused_panel().unwrap();
        engine.split_focused(SplitDirection::Horizontal).unwrap();

        let outcome = engine.close_focused();
        let CloseOutcome::Closed { focus, .. } = outcome else {
            panic!("expected Closed, got {outcome:?}");
        };
        assert_eq!(focus, original);
        assert_eq!(engine.focused_panel(), Some(original));
        assert_eq!(engine.panel_count(), 1);
    }

    #[test]
    fn close_unfocused_panel_keeps_focus() {
        let mut engine = engine();
        let original = engine.focused_panel().unwrap();
        let new_panel = engine.split_focused(SplitDirection::Vertical).unwrap();

        let outcome = engine.close_panel(original);
        let CloseOutcome::Closed { panel, focus, .. } = outcome else {
            panic!("expected Closed, got {outcome:?}");
        };
        assert_eq!(panel, original);
        assert_eq!(focus, new_panel);
        assert_eq!(engine.focused_panel(), Some(new_panel));
    }

    #[test]
    fn close_reports_session_of_closed_panel() {
        let mut engine = engine();
        let new_panel = engine.split_focused(SplitDirection::Horizontal).unwrap();
        let expected = engine.session_of(new_panel).unwrap();

        let CloseOutcome::Closed { session, .. } = engine.close_panel(new_panel) else {
            panic!("expected Closed");
        };
        assert_eq!(session, expected);
    }

    #[test]
    fn closing_last_panel_reports_all_closed_once() {
        let mut engine = engine();
        let panel = engine.focused_panel().unwrap();

        let outcome = engine.close_focused();
        assert!(matches!(outcome, CloseOutcome::AllClosed { panel: p, .. } if p == panel));
        assert!(engine.is_empty());
        assert_eq!(engine.focused_panel(), None);

        // The layout stays empty and further closes are ignored.
        assert_eq!(engine.close_focused(), CloseOutcome::Ignored);
        assert_eq!(engine.close_panel(panel), CloseOutcome::Ignored);
    }

    #[test]
    fn close_unknown_panel_is_ignored() {
        let mut engine = engine();
        assert_eq!(engine.close_panel(PanelId::new()), CloseOutcome::Ignored);
        assert_eq!(engine.panel_count(), 1);
    }

    #[test]
    fn double_close_of_same_panel_is_ignored() {
        let mut engine = engine();
        let new_panel = engine.split_focused(SplitDirection::Horizontal).unwrap();

        assert!(matches!(
            engine.close_panel(new_panel),
            CloseOutcome::Closed { .. }
        ));
        assert_eq!(engine.close_panel(new_panel), CloseOutcome::Ignored);
    }

    // ========================================================================
    // Focus
    // ========================================================================

    #[test]
    fn set_focus_moves_focus_to_known_panel() {
        let mut engine = engine();
        let original = engine.focused_panel().unwrap();
        engine.split_focused(SplitDirection::Horizontal).unwrap();

        engine.set_focus(original).unwrap();
        assert_eq!(engine.focused_panel(), Some(original));
    }

    #[test]
    fn set_focus_rejects_unknown_panel() {
        let mut engine = engine();
        let before = engine.focused_panel();
        let err = engine.set_focus(PanelId::new()).unwrap_err();
        assert!(matches!(err, SplitError::PanelNotFound(_)));
        assert_eq!(engine.focused_panel(), before);
    }

    #[test]
    fn navigate_is_a_noop_with_one_panel() {
        let mut engine = engine();
        let panel = engine.focused_panel().unwrap();
        assert!(engine.navigate(NavDirection::Right).is_none());
        assert_eq!(engine.focused_panel(), Some(panel));
    }

    #[test]
    fn navigate_steps_through_preorder_list() {
        let mut engine = engine();
        engine.split_focused(SplitDirection::Horizontal).unwrap();
        engine.split_focused(SplitDirection::Vertical).unwrap();
        let order = engine.panel_ids();

        engine.set_focus(order[0]).unwrap();
        assert_eq!(engine.navigate(NavDirection::Right), Some(order[1]));
        assert_eq!(engine.navigate(NavDirection::Down), Some(order[2]));
    }

    #[test]
    fn navigate_wraps_at_both_ends() {
        let mut engine = engine();
        engine.split_focused(SplitDirection::Horizontal).unwrap();
        engine.split_focused(SplitDirection::Vertical).unwrap();
        let order = engine.panel_ids();

        engine.set_focus(order[order.len() - 1]).unwrap();
        assert_eq!(engine.navigate(NavDirection::Right), Some(order[0]));
        assert_eq!(engine.navigate(NavDirection::Left), Some(order[order.len() - 1]));
    }

    #[test]
    fn up_and_left_step_backward() {
        let mut engine = engine();
        engine.split_focused(SplitDirection::Horizontal).unwrap();
        let order = engine.panel_ids();

        engine.set_focus(order[1]).unwrap();
        assert_eq!(engine.navigate(NavDirection::Up), Some(order[0]));
        engine.set_focus(order[1]).unwrap();
        assert_eq!(engine.navigate(NavDirection::Left), Some(order[0]));
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut engine = engine();
        engine.split_focused(SplitDirection::Horizontal).unwrap();
        engine.split_focused(SplitDirection::Vertical).unwrap();
        engine.split_focused(SplitDirection::Horizontal).unwrap();
        let start = engine.focused_panel().unwrap();

        for _ in 0..engine.panel_count() {
            engine.navigate(NavDirection::Right);
        }
        assert_eq!(engine.focused_panel(), Some(start));
    }

    // ========================================================================
    // Resizing
    // ========================================================================

    #[test]
    fn update_ratio_changes_layout() {
        let mut engine = engine();
        engine.split_focused(SplitDirection::Horizontal).unwrap();
        let node = engine.splitters()[0].node;

        assert!(engine.update_ratio(node, 0.3));
        let layouts = engine.layouts();
        assert!((layouts[0].rect.width - 0.3).abs() < f64::EPSILON);
        assert!((layouts[1].rect.width - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn update_ratio_clamps_to_min_fraction() {
        let mut engine = engine();
        engine.split_focused(SplitDirection::Vertical).unwrap();
        let node = engine.splitters()[0].node;

        assert!(engine.update_ratio(node, 0.01));
        let layouts = engine.layouts();
        assert!((layouts[0].rect.height - engine.min_ratio()).abs() < f64::EPSILON);
    }

    #[test]
    fn update_ratio_for_unknown_node_is_a_noop() {
        let mut engine = engine();
        engine.split_focused(SplitDirection::Horizontal).unwrap();
        let before = engine.layouts();

        assert!(!engine.update_ratio(NodeId::new(), 0.3));
        assert_eq!(engine.layouts(), before);
    }

    // ========================================================================
    // Scenario
    // ========================================================================

    #[test]
    fn split_resize_close_scenario() {
        let mut engine = engine();
        let a = engine.focused_panel().unwrap();

        // Split A horizontally, then the new panel B vertically.
        let b = engine.split_focused(SplitDirection::Horizontal).unwrap();
        let c = engine.split_focused(SplitDirection::Vertical).unwrap();
        assert_eq!(engine.panel_ids(), vec![a, b, c]);

        // Reference geometry on 100x100.
        let rect = LayoutRect::new(0.0, 0.0, 100.0, 100.0);
        let layouts = engine.layouts_in(rect);
        assert_eq!(layouts[0].rect, LayoutRect::new(0.0, 0.0, 50.0, 100.0));
        assert_eq!(layouts[1].rect, LayoutRect::new(50.0, 0.0, 50.0, 50.0));
        assert_eq!(layouts[2].rect, LayoutRect::new(50.0, 50.0, 50.0, 50.0));

        // Drag the outer splitter to 0.3.
        let outer = engine.splitters()[0].node;
        engine.update_ratio(outer, 0.3);
        let layouts = engine.layouts_in(rect);
        assert!((layouts[0].rect.width - 30.0).abs() < 1e-9);

        // Close C; B regains the right half's full height.
        engine.close_panel(c);
        let layouts = engine.layouts_in(rect);
        assert_eq!(layouts.len(), 2);
        assert!((layouts[1].rect.height - 100.0).abs() < f64::EPSILON);

        // Close everything.
        assert!(matches!(engine.close_panel(b), CloseOutcome::Closed { .. }));
        assert!(matches!(
            engine.close_panel(a),
            CloseOutcome::AllClosed { .. }
        ));
        assert!(engine.is_empty());
        assert!(engine.layouts().is_empty());
    }
}
