//! Identity-keyed panel host registry
//!
//! The registry keeps one live host instance per panel ID and
//! reconciles that set against each compiled layout: hosts for new
//! panels are created, hosts for surviving panels are updated in place,
//! and hosts for closed panels are dropped. A panel's host is never
//! torn down and recreated just because its rectangle or position in
//! the layout output changed, so terminal scrollback and selection
//! survive every split, resize, and close of other panels.

use std::collections::HashMap;

use termgrid_core::split::{LayoutRect, PanelId, PanelLayout};
use tracing::debug;

/// A toolkit-side panel instance managed by the registry.
///
/// Implementations wrap whatever widget displays a session (a terminal
/// view, in practice). The registry drives geometry and focus through
/// this trait and queues [`refit`](PanelHost::refit) calls for the
/// embedder to flush after its debounce interval.
pub trait PanelHost {
    /// Applies a new rectangle to the host's widget.
    fn set_rect(&mut self, rect: LayoutRect);

    /// Updates the host's focus indication.
    fn set_focused(&mut self, focused: bool);

    /// Re-fits the hosted content to the current rectangle, e.g.
    /// recomputing a terminal's row/column grid.
    fn refit(&mut self);
}

/// Bookkeeping for one live host.
#[derive(Debug)]
struct HostEntry<H> {
    host: H,
    rect: LayoutRect,
    focused: bool,
}

/// Counts of what a reconcile pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileStats {
    /// Hosts created for newly appeared panels.
    pub created: usize,
    /// Hosts whose rectangle changed.
    pub updated: usize,
    /// Hosts dropped for closed panels.
    pub removed: usize,
}

/// Registry of live panel hosts, keyed by panel ID.
#[derive(Debug)]
pub struct HostRegistry<H> {
    hosts: HashMap<PanelId, HostEntry<H>>,
    /// Panels whose geometry changed and need a refit once the
    /// embedder's debounce interval elapses.
    pending_refits: Vec<PanelId>,
}

impl<H: PanelHost> Default for HostRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: PanelHost> HostRegistry<H> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hosts: HashMap::new(),
            pending_refits: Vec::new(),
        }
    }

    /// Returns the number of live hosts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Returns true if no hosts are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Returns true if a host exists for the panel.
    #[must_use]
    pub fn contains(&self, panel: PanelId) -> bool {
        self.hosts.contains_key(&panel)
    }

    /// Returns the host for a panel.
    #[must_use]
    pub fn get(&self, panel: PanelId) -> Option<&H> {
        self.hosts.get(&panel).map(|entry| &entry.host)
    }

    /// Returns the host for a panel mutably.
    pub fn get_mut(&mut self, panel: PanelId) -> Option<&mut H> {
        self.hosts.get_mut(&panel).map(|entry| &mut entry.host)
    }

    /// Returns the rectangle last applied to a panel's host.
    #[must_use]
    pub fn rect_of(&self, panel: PanelId) -> Option<LayoutRect> {
        self.hosts.get(&panel).map(|entry| entry.rect)
    }

    /// Reconciles live hosts against a compiled layout.
    ///
    /// For each layout entry, an existing host is updated in place and
    /// a missing one is created through `factory`. Hosts whose panels
    /// no longer appear are dropped. Geometry changes queue the panel
    /// for a debounced refit.
    pub fn reconcile<F>(
        &mut self,
        layouts: &[PanelLayout],
        focused: Option<PanelId>,
        mut factory: F,
    ) -> ReconcileStats
    where
        F: FnMut(&PanelLayout) -> H,
    {
        let mut stats = ReconcileStats::default();

        for layout in layouts {
            let is_focused = focused == Some(layout.panel);
            if let Some(entry) = self.hosts.get_mut(&layout.panel) {
                if entry.rect != layout.rect {
                    entry.rect = layout.rect;
                    entry.host.set_rect(layout.rect);
                    self.pending_refits.push(layout.panel);
                    stats.updated += 1;
                }
                if entry.focused != is_focused {
                    entry.focused = is_focused;
                    entry.host.set_focused(is_focused);
                }
            } else {
                let mut host = factory(layout);
                host.set_rect(layout.rect);
                host.set_focused(is_focused);
                self.hosts.insert(
                    layout.panel,
                    HostEntry {
                        host,
                        rect: layout.rect,
                        focused: is_focused,
                    },
                );
                self.pending_refits.push(layout.panel);
                stats.created += 1;
            }
        }

        // Drop hosts whose panels were closed.
        let stale: Vec<PanelId> = self
            .hosts
            .keys()
            .copied()
            .filter(|id| !layouts.iter().any(|l| l.panel == *id))
            .collect();
        for id in stale {
            self.hosts.remove(&id);
            self.pending_refits.retain(|p| *p != id);
            stats.removed += 1;
        }

        if stats != ReconcileStats::default() {
            debug!(
                created = stats.created,
                updated = stats.updated,
                removed = stats.removed,
                "hosts reconciled"
            );
        }
        stats
    }

    /// Drains the queue of panels waiting for a refit, deduplicated in
    /// first-queued order.
    ///
    /// The embedder calls this once its debounce timer fires.
    pub fn take_pending_refits(&mut self) -> Vec<PanelId> {
        let mut drained = std::mem::take(&mut self.pending_refits);
        let mut seen = Vec::with_capacity(drained.len());
        drained.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
        drained
    }

    /// Drains the refit queue and invokes [`PanelHost::refit`] on each
    /// queued host that is still live.
    pub fn flush_refits(&mut self) {
        for panel in self.take_pending_refits() {
            if let Some(entry) = self.hosts.get_mut(&panel) {
                entry.host.refit();
            }
        }
    }
}
