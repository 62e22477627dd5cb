//! Property-based tests for the split layout engine
//!
//! Drives the engine through random operation sequences and checks the
//! structural invariants that must hold at every step: the leaf
//! rectangles always partition the container, ratios stay clamped,
//! focus always points at a live panel, and panel IDs stay unique.

use proptest::prelude::*;
use termgrid_core::settings::LayoutSettings;
use termgrid_core::split::{
    CloseOutcome, IdSource, LayoutRect, NavDirection, SplitDirection, SplitLayoutEngine,
};

// ============================================================================
// Strategies
// ============================================================================

/// One operation against the engine. Panels and splits are addressed
/// by index into the current pre-order lists so every generated
/// operation targets something that exists.
#[derive(Debug, Clone, Copy)]
enum LayoutOperation {
    Split {
        panel_index: usize,
        direction: SplitDirection,
    },
    Close {
        panel_index: usize,
    },
    Resize {
        split_index: usize,
        ratio: f64,
    },
    Navigate(NavDirection),
    Focus {
        panel_index: usize,
    },
}

fn direction_strategy() -> impl Strategy<Value = SplitDirection> {
    prop_oneof![
        Just(SplitDirection::Horizontal),
        Just(SplitDirection::Vertical),
    ]
}

fn nav_strategy() -> impl Strategy<Value = NavDirection> {
    prop_oneof![
        Just(NavDirection::Up),
        Just(NavDirection::Down),
        Just(NavDirection::Left),
        Just(NavDirection::Right),
    ]
}

fn operation_strategy() -> impl Strategy<Value = LayoutOperation> {
    prop_oneof![
        (0usize..16, direction_strategy()).prop_map(|(panel_index, direction)| {
            LayoutOperation::Split {
                panel_index,
                direction,
            }
        }),
        (0usize..16).prop_map(|panel_index| LayoutOperation::Close { panel_index }),
        (0usize..16, -0.5f64..1.5).prop_map(|(split_index, ratio)| LayoutOperation::Resize {
            split_index,
            ratio,
        }),
        nav_strategy().prop_map(LayoutOperation::Navigate),
        (0usize..16).prop_map(|panel_index| LayoutOperation::Focus { panel_index }),
    ]
}

fn operations_strategy() -> impl Strategy<Value = Vec<LayoutOperation>> {
    proptest::collection::vec(operation_strategy(), 1..24)
}

fn test_engine() -> SplitLayoutEngine {
    let mut ids = IdSource::sequence();
    let session = ids.session_id();
    SplitLayoutEngine::configured(session, LayoutSettings::default(), ids)
}

fn apply_operation(engine: &mut SplitLayoutEngine, op: LayoutOperation) {
    match op {
        LayoutOperation::Split {
            panel_index,
            direction,
        } => {
            let panels = engine.panel_ids();
            if let Some(&target) = panels.get(panel_index % panels.len().max(1)) {
                engine.split_panel(target, direction, None);
            }
        }
        LayoutOperation::Close { panel_index } => {
            let panels = engine.panel_ids();
            if let Some(&target) = panels.get(panel_index % panels.len().max(1)) {
                engine.close_panel(target);
            }
        }
        LayoutOperation::Resize { split_index, ratio } => {
            let splitters = engine.splitters();
            if let Some(handle) = splitters.get(split_index % splitters.len().max(1)) {
                engine.update_ratio(handle.node, ratio);
            }
        }
        LayoutOperation::Navigate(direction) => {
            engine.navigate(direction);
        }
        LayoutOperation::Focus { panel_index } => {
            let panels = engine.panel_ids();
            if let Some(&target) = panels.get(panel_index % panels.len().max(1)) {
                engine.set_focus(target).unwrap();
            }
        }
    }
}

fn rects_overlap(a: &LayoutRect, b: &LayoutRect) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Leaf rectangles tile the container after any operation sequence.
    #[test]
    fn leaf_rects_always_partition_container(ops in operations_strategy()) {
        let mut engine = test_engine();
        let container = LayoutRect::new(0.0, 0.0, 1280.0, 800.0);

        for op in ops {
            apply_operation(&mut engine, op);

            let layouts = engine.layouts_in(container);
            prop_assert_eq!(layouts.len(), engine.panel_count());
            if layouts.is_empty() {
                continue;
            }

            let total: f64 = layouts.iter().map(|l| l.rect.area()).sum();
            prop_assert!((total - container.area()).abs() < 1e-6);

            for (i, a) in layouts.iter().enumerate() {
                prop_assert!(a.rect.x >= container.x - 1e-9);
                prop_assert!(a.rect.y >= container.y - 1e-9);
                prop_assert!(a.rect.x + a.rect.width <= container.x + container.width + 1e-9);
                prop_assert!(a.rect.y + a.rect.height <= container.y + container.height + 1e-9);
                for b in &layouts[i + 1..] {
                    prop_assert!(!rects_overlap(&a.rect, &b.rect));
                }
            }
        }
    }

    /// A tree with n panels always exposes n-1 splitter handles.
    #[test]
    fn splitter_count_tracks_panel_count(ops in operations_strategy()) {
        let mut engine = test_engine();
        for op in ops {
            apply_operation(&mut engine, op);
            let panels = engine.panel_count();
            let splitters = engine.splitters().len();
            prop_assert_eq!(splitters, panels.saturating_sub(1));
        }
    }

    /// Every split ratio stays inside the clamped range, no matter what
    /// values were requested.
    #[test]
    fn ratios_stay_clamped(ops in operations_strategy()) {
        let mut engine = test_engine();
        let min = engine.min_ratio();
        for op in ops {
            apply_operation(&mut engine, op);
            for handle in engine.splitters() {
                let split = engine
                    .root()
                    .and_then(|root| root.find_split(handle.node))
                    .unwrap();
                prop_assert!(split.ratio >= min - 1e-12);
                prop_assert!(split.ratio <= 1.0 - min + 1e-12);
            }
        }
    }

    /// Focus always points at a live panel while the layout is
    /// non-empty, and at nothing once it is empty.
    #[test]
    fn focus_is_always_valid(ops in operations_strategy()) {
        let mut engine = test_engine();
        for op in ops {
            apply_operation(&mut engine, op);
            match engine.focused_panel() {
                Some(panel) => prop_assert!(engine.panel_ids().contains(&panel)),
                None => prop_assert!(engine.is_empty()),
            }
        }
    }

    /// Panel IDs never collide, however many splits happen.
    #[test]
    fn panel_ids_stay_unique(ops in operations_strategy()) {
        let mut engine = test_engine();
        for op in ops {
            apply_operation(&mut engine, op);
            let mut ids = engine.panel_ids();
            let before = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), before);
        }
    }

    /// Splitting a panel and then closing the new panel restores the
    /// original geometry.
    #[test]
    fn close_undoes_split(
        setup in operations_strategy(),
        direction in direction_strategy(),
    ) {
        let mut engine = test_engine();
        for op in setup {
            apply_operation(&mut engine, op);
        }
        prop_assume!(!engine.is_empty());

        let before = engine.layouts();
        let target = engine.focused_panel().unwrap();
        let new_panel = engine.split_panel(target, direction, None).unwrap();

        let outcome = engine.close_panel(new_panel);
        prop_assert!(
            matches!(outcome, CloseOutcome::Closed { .. }),
            "expected CloseOutcome::Closed, got {:?}",
            outcome
        );
        prop_assert_eq!(engine.layouts(), before);
        // The new panel held focus, so focus falls back to the first
        // panel in pre-order.
        prop_assert_eq!(engine.focused_panel(), engine.panel_ids().first().copied());
    }

    /// Stepping forward once per panel cycles focus back to the start.
    #[test]
    fn navigation_is_cyclic(ops in operations_strategy()) {
        let mut engine = test_engine();
        for op in ops {
            apply_operation(&mut engine, op);
        }
        prop_assume!(engine.panel_count() >= 2);

        let start = engine.focused_panel().unwrap();
        for _ in 0..engine.panel_count() {
            prop_assert!(engine.navigate(NavDirection::Right).is_some());
        }
        prop_assert_eq!(engine.focused_panel(), Some(start));

        // And backward the same way.
        for _ in 0..engine.panel_count() {
            prop_assert!(engine.navigate(NavDirection::Left).is_some());
        }
        prop_assert_eq!(engine.focused_panel(), Some(start));
    }

    /// Stale IDs never change anything: closing, splitting, or resizing
    /// against IDs from an emptied engine is a no-op.
    #[test]
    fn stale_ids_are_noops(ops in operations_strategy()) {
        let mut engine = test_engine();
        for op in ops {
            apply_operation(&mut engine, op);
        }

        // Drain the layout completely, remembering every ID.
        let panels = engine.panel_ids();
        let splitters: Vec<_> = engine.splitters().iter().map(|s| s.node).collect();
        for &panel in &panels {
            engine.close_panel(panel);
        }
        prop_assert!(engine.is_empty());

        for &panel in &panels {
            prop_assert_eq!(engine.close_panel(panel), CloseOutcome::Ignored);
            prop_assert!(engine
                .split_panel(panel, SplitDirection::Horizontal, None)
                .is_none());
        }
        for node in splitters {
            prop_assert!(!engine.update_ratio(node, 0.5));
        }
        prop_assert!(engine.is_empty());
    }
}
