//! Error types for split layout operations
//!
//! Tree mutations deliberately do not error: a stale panel or node ID
//! (e.g. a double-invoked close) degrades to a no-op instead of
//! corrupting the tree, and out-of-range ratios are clamped rather than
//! rejected. Only genuinely exceptional conditions remain as errors.

use super::types::PanelId;

/// Errors that can occur during split layout operations.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// The specified panel was not found.
    #[error("panel not found: {0}")]
    PanelNotFound(PanelId),
}
