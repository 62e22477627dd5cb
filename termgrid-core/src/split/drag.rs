//! Drag controller for splitter-handle resizing
//!
//! Converts pointer-drag gestures on a splitter handle into clamped
//! ratio updates. The controller is a pure state machine: the embedder
//! feeds it pointer events and drains at most one [`RatioUpdate`] per
//! render frame, so a flood of high-frequency move events never causes
//! more than one relayout per frame.
//!
//! While a gesture is active the embedder must force a global resize
//! cursor and suppress text selection; [`DragController::begin`]
//! reports which cursor. Both [`finish`](DragController::finish) and
//! [`cancel`](DragController::cancel) end the gesture and are
//! idempotent, so the embedder can call them from every exit path
//! (pointer-up anywhere, window blur, escape) without tracking state.

use tracing::{debug, trace};

use super::layout::SplitterHandle;
use super::types::{NodeId, SplitDirection};

/// Global cursor shape the embedder must force during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeCursor {
    /// Column-resize cursor (dragging a horizontal split's divider).
    Column,
    /// Row-resize cursor (dragging a vertical split's divider).
    Row,
}

impl ResizeCursor {
    /// Returns the cursor for a split direction.
    #[must_use]
    pub const fn for_direction(direction: SplitDirection) -> Self {
        match direction {
            SplitDirection::Horizontal => Self::Column,
            SplitDirection::Vertical => Self::Row,
        }
    }
}

/// A coalesced ratio update produced by a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioUpdate {
    /// The split node to update.
    pub node: NodeId,
    /// The new clamped ratio.
    pub ratio: f64,
}

/// Active gesture state.
#[derive(Debug, Clone)]
struct Gesture {
    handle: SplitterHandle,
    /// Latest pointer-derived ratio not yet drained. Overwritten by
    /// each move: last write wins within a frame.
    pending: Option<f64>,
}

/// Pointer-gesture state machine for splitter dragging.
#[derive(Debug, Clone)]
pub struct DragController {
    min_ratio: f64,
    gesture: Option<Gesture>,
}

impl DragController {
    /// Creates a controller that clamps ratios to
    /// `[min_ratio, 1 - min_ratio]`.
    #[must_use]
    pub const fn new(min_ratio: f64) -> Self {
        Self {
            min_ratio,
            gesture: None,
        }
    }

    /// Begins a drag gesture on a splitter handle, replacing any
    /// gesture still active.
    ///
    /// Returns the resize cursor the embedder must force globally for
    /// the duration of the gesture.
    pub fn begin(&mut self, handle: SplitterHandle) -> ResizeCursor {
        debug!(node = %handle.node, direction = %handle.direction, "drag begin");
        let cursor = ResizeCursor::for_direction(handle.direction);
        self.gesture = Some(Gesture {
            handle,
            pending: None,
        });
        cursor
    }

    /// Returns true while a gesture is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Returns the cursor for the active gesture, if any.
    #[must_use]
    pub fn cursor(&self) -> Option<ResizeCursor> {
        self.gesture
            .as_ref()
            .map(|g| ResizeCursor::for_direction(g.handle.direction))
    }

    /// Feeds a pointer position in the same coordinate space as the
    /// handle's bounds.
    ///
    /// The new ratio is the pointer's position along the split axis,
    /// relative to the handle's bounding rectangle, clamped to the
    /// valid range. Repeated moves overwrite the pending value; the
    /// update is not applied until [`take_frame_update`] drains it.
    ///
    /// Returns true if a gesture consumed the event.
    ///
    /// [`take_frame_update`]: DragController::take_frame_update
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let min_ratio = self.min_ratio;
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };

        let bounds = gesture.handle.bounds;
        let raw = match gesture.handle.direction {
            SplitDirection::Horizontal => (x - bounds.x) / bounds.width,
            SplitDirection::Vertical => (y - bounds.y) / bounds.height,
        };
        if !raw.is_finite() {
            return true;
        }
        let ratio = raw.clamp(min_ratio, 1.0 - min_ratio);
        trace!(node = %gesture.handle.node, ratio, "drag move");
        gesture.pending = Some(ratio);
        true
    }

    /// Drains the pending ratio update, at most one per call.
    ///
    /// The embedder calls this once per render frame and applies the
    /// result to the engine.
    pub fn take_frame_update(&mut self) -> Option<RatioUpdate> {
        let gesture = self.gesture.as_mut()?;
        gesture.pending.take().map(|ratio| RatioUpdate {
            node: gesture.handle.node,
            ratio,
        })
    }

    /// Ends the gesture normally (pointer-up), flushing any pending
    /// update so the final pointer position is not lost.
    ///
    /// Idempotent: returns `None` when no gesture is active.
    pub fn finish(&mut self) -> Option<RatioUpdate> {
        let update = self.take_frame_update();
        if let Some(gesture) = self.gesture.take() {
            debug!(node = %gesture.handle.node, "drag finish");
        }
        update
    }

    /// Aborts the gesture (escape or window blur), discarding any
    /// pending update.
    ///
    /// Idempotent: safe to call with no gesture active.
    pub fn cancel(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            debug!(node = %gesture.handle.node, "drag cancel");
        }
    }
}
