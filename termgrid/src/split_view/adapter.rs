//! Toolkit adapter for the split layout engine
//!
//! [`SplitViewAdapter`] binds one engine instance to a set of panel
//! hosts and a drag gesture. The embedder feeds it user intent (split,
//! close, navigate, pointer events) and calls [`sync`] after each
//! mutation to reconcile the live hosts against the freshly compiled
//! layout.
//!
//! Pointer capture during a drag goes through the [`PointerLock`]
//! trait so the adapter stays toolkit-free; the lock is released on
//! every gesture exit path, including cancellation.
//!
//! [`sync`]: SplitViewAdapter::sync

use termgrid_core::settings::LayoutSettings;
use termgrid_core::split::{
    CloseOutcome, DragController, IdSource, LayoutRect, NavDirection, PanelId, PanelLayout,
    ResizeCursor, SessionId, SplitDirection, SplitError, SplitLayoutEngine, SplitterHandle,
};
use tracing::debug;

use super::host::{HostRegistry, PanelHost, ReconcileStats};

/// Global pointer capture for drag gestures.
///
/// Implementations grab the pointer, force the resize cursor, and
/// suppress text selection for the whole window while a splitter drag
/// is active. `release` must be idempotent: the adapter calls it on
/// every exit path without tracking whether the lock is held.
pub trait PointerLock {
    /// Engages the lock with the given cursor.
    fn acquire(&mut self, cursor: ResizeCursor);

    /// Releases the lock. Must be safe to call when not held.
    fn release(&mut self);
}

/// A lock that does nothing, for tests and headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLock;

impl PointerLock for NoopLock {
    fn acquire(&mut self, _cursor: ResizeCursor) {}

    fn release(&mut self) {}
}

/// Binds a layout engine to panel hosts, a drag controller, and a
/// pointer lock.
pub struct SplitViewAdapter<H> {
    engine: SplitLayoutEngine,
    hosts: HostRegistry<H>,
    drag: DragController,
    lock: Box<dyn PointerLock>,
    on_all_closed: Option<Box<dyn FnMut()>>,
}

impl<H> std::fmt::Debug for SplitViewAdapter<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitViewAdapter")
            .field("engine", &self.engine)
            .field("dragging", &self.drag.is_dragging())
            .finish_non_exhaustive()
    }
}

impl<H: PanelHost> SplitViewAdapter<H> {
    /// Creates an adapter with a single panel showing `session`,
    /// default settings, and no pointer lock.
    #[must_use]
    pub fn with_session(session: SessionId) -> Self {
        Self::configured(session, LayoutSettings::default(), IdSource::random())
    }

    /// Creates an adapter with explicit settings and ID source.
    #[must_use]
    pub fn configured(session: SessionId, settings: LayoutSettings, ids: IdSource) -> Self {
        let engine = SplitLayoutEngine::configured(session, settings, ids);
        let drag = DragController::new(engine.min_ratio());
        Self {
            engine,
            hosts: HostRegistry::new(),
            drag,
            lock: Box::new(NoopLock),
            on_all_closed: None,
        }
    }

    /// Replaces the pointer lock implementation.
    pub fn set_pointer_lock(&mut self, lock: Box<dyn PointerLock>) {
        self.lock = lock;
    }

    /// Sets the callback invoked when the last panel closes.
    pub fn set_on_all_closed(&mut self, callback: Box<dyn FnMut()>) {
        self.on_all_closed = Some(callback);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the underlying engine.
    #[must_use]
    pub const fn engine(&self) -> &SplitLayoutEngine {
        &self.engine
    }

    /// Returns the number of open panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.engine.panel_count()
    }

    /// Returns true once every panel has been closed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    /// Returns the focused panel.
    #[must_use]
    pub const fn focused_panel(&self) -> Option<PanelId> {
        self.engine.focused_panel()
    }

    /// Compiles panel rectangles for the given container.
    #[must_use]
    pub fn layouts_in(&self, rect: LayoutRect) -> Vec<PanelLayout> {
        self.engine.layouts_in(rect)
    }

    /// Compiles splitter handles for the given container.
    #[must_use]
    pub fn splitters_in(&self, rect: LayoutRect) -> Vec<SplitterHandle> {
        self.engine.splitters_in(rect)
    }

    /// Returns the host for a panel.
    #[must_use]
    pub fn host(&self, panel: PanelId) -> Option<&H> {
        self.hosts.get(panel)
    }

    /// Returns the host for a panel mutably.
    pub fn host_mut(&mut self, panel: PanelId) -> Option<&mut H> {
        self.hosts.get_mut(panel)
    }

    /// Debounce interval the embedder should apply before flushing
    /// refits, in milliseconds.
    #[must_use]
    pub fn refit_debounce_ms(&self) -> u64 {
        self.engine.settings().refit_debounce_ms
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Splits the focused panel; the new panel receives focus.
    pub fn split_focused(&mut self, direction: SplitDirection) -> Option<PanelId> {
        self.engine.split_focused(direction)
    }

    /// Splits the focused panel, attaching an existing session to the
    /// new panel.
    pub fn split_focused_with(
        &mut self,
        direction: SplitDirection,
        session: SessionId,
    ) -> Option<PanelId> {
        self.engine.split_focused_with(direction, session)
    }

    /// Closes the focused panel.
    pub fn close_focused(&mut self) -> CloseOutcome {
        let outcome = self.engine.close_focused();
        self.after_close(outcome)
    }

    /// Closes a specific panel, typically when its session ends.
    pub fn request_close(&mut self, panel: PanelId) -> CloseOutcome {
        let outcome = self.engine.close_panel(panel);
        self.after_close(outcome)
    }

    fn after_close(&mut self, outcome: CloseOutcome) -> CloseOutcome {
        if matches!(outcome, CloseOutcome::AllClosed { .. }) {
            if let Some(callback) = self.on_all_closed.as_mut() {
                callback();
            }
        }
        outcome
    }

    /// Moves focus to a neighboring panel in the flattened layout
    /// order.
    pub fn navigate_panel(&mut self, direction: NavDirection) -> Option<PanelId> {
        self.engine.navigate(direction)
    }

    /// Focuses a specific panel, e.g. on click.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::PanelNotFound`] if the panel is not in the
    /// layout.
    pub fn focus_panel(&mut self, panel: PanelId) -> Result<(), SplitError> {
        self.engine.set_focus(panel)
    }

    // ========================================================================
    // Drag Gestures
    // ========================================================================

    /// Begins a drag on a splitter handle and engages the pointer
    /// lock.
    pub fn begin_drag(&mut self, handle: SplitterHandle) -> ResizeCursor {
        let cursor = self.drag.begin(handle);
        self.lock.acquire(cursor);
        cursor
    }

    /// Returns true while a drag gesture is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Feeds a pointer position, in the coordinate space the handles
    /// were compiled in. Returns true if a gesture consumed it.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        self.drag.pointer_move(x, y)
    }

    /// Applies at most one coalesced ratio update, once per render
    /// frame. Returns true if the layout changed.
    pub fn end_frame(&mut self) -> bool {
        match self.drag.take_frame_update() {
            Some(update) => self.engine.update_ratio(update.node, update.ratio),
            None => false,
        }
    }

    /// Finishes the drag, applying the final pointer position and
    /// releasing the pointer lock.
    ///
    /// Returns true if the layout changed.
    pub fn finish_drag(&mut self) -> bool {
        let changed = match self.drag.finish() {
            Some(update) => self.engine.update_ratio(update.node, update.ratio),
            None => false,
        };
        self.lock.release();
        changed
    }

    /// Cancels the drag, discarding any pending update and releasing
    /// the pointer lock.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
        self.lock.release();
    }

    // ========================================================================
    // Host Reconciliation
    // ========================================================================

    /// Reconciles panel hosts against the layout compiled for `rect`.
    ///
    /// New panels get hosts via `factory`, surviving hosts are updated
    /// in place, and hosts for closed panels are dropped.
    pub fn sync<F>(&mut self, rect: LayoutRect, factory: F) -> ReconcileStats
    where
        F: FnMut(&PanelLayout) -> H,
    {
        let layouts = self.engine.layouts_in(rect);
        let stats = self
            .hosts
            .reconcile(&layouts, self.engine.focused_panel(), factory);
        if stats.created + stats.removed > 0 {
            debug!(panels = layouts.len(), "layout synced");
        }
        stats
    }

    /// Drains the queue of panels waiting for a refit.
    pub fn take_pending_refits(&mut self) -> Vec<PanelId> {
        self.hosts.take_pending_refits()
    }

    /// Refits every queued host. The embedder calls this after the
    /// debounce interval from [`refit_debounce_ms`] elapses.
    ///
    /// [`refit_debounce_ms`]: SplitViewAdapter::refit_debounce_ms
    pub fn flush_refits(&mut self) {
        self.hosts.flush_refits();
    }
}
