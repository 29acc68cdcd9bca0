//! Property-based tests for hover tracking and the removal timer

use std::time::{Duration, Instant};

use proptest::prelude::*;
use tessera_core::overlay::{DEFAULT_HOVER_GRACE, HoverState};
use tessera_core::TreePath;

#[derive(Debug, Clone)]
enum Step {
    Enter(u8),
    Leave,
    Wait(u16),
    Clear,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0u8..4).prop_map(Step::Enter),
        Just(Step::Leave),
        (0u16..600).prop_map(Step::Wait),
        Just(Step::Clear),
    ]
}

fn region(idx: u8) -> TreePath {
    TreePath::parse(&format!("page/r{idx}")).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Feature: highlight-overlay, Property 1: No Flicker**
    ///
    /// Entering, leaving and re-entering within the grace period never clears
    /// the hovered path, however the timer is polled in between.
    #[test]
    fn prop_reenter_within_grace_keeps_hover(
        first in 0u8..4,
        second in 0u8..4,
        gap_ms in 0u64..300,
        poll_ms in 0u64..2_000,
    ) {
        let mut hover = HoverState::new();
        let t0 = Instant::now();
        hover.enter(region(first));
        hover.leave(t0, DEFAULT_HOVER_GRACE);
        prop_assert!(!hover.fire_due(t0 + Duration::from_millis(gap_ms)));
        hover.enter(region(second));

        prop_assert!(!hover.fire_due(t0 + Duration::from_millis(gap_ms + poll_ms)));
        prop_assert_eq!(hover.hovered(), Some(&region(second)));
    }

    /// **Feature: highlight-overlay, Property 2: Single Timer**
    ///
    /// After any sequence of steps at most one removal timer is pending, and
    /// when a hover is cleared by the timer it happens exactly once.
    #[test]
    fn prop_at_most_one_timer(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let mut hover = HoverState::new();
        let mut now = Instant::now();

        for step in steps {
            match step {
                Step::Enter(idx) => hover.enter(region(idx)),
                Step::Leave => { hover.leave(now, DEFAULT_HOVER_GRACE); }
                Step::Wait(ms) => {
                    now += Duration::from_millis(u64::from(ms));
                    let pending = hover.pending_removal().copied();
                    if hover.fire_due(now) {
                        prop_assert!(pending.is_some_and(|t| t.deadline <= now));
                        prop_assert!(hover.hovered().is_none());
                        prop_assert!(!hover.fire_due(now), "timer fired twice");
                    }
                }
                Step::Clear => hover.clear(),
            }
            if let Some(timer) = hover.pending_removal() {
                prop_assert!(timer.deadline <= now + DEFAULT_HOVER_GRACE);
            }
        }
    }

    /// **Feature: highlight-overlay, Property 3: Stale Timer Ignored**
    ///
    /// A timer replaced by a later leave cannot clear the hover.
    #[test]
    fn prop_replaced_timer_is_stale(leaves in 2usize..6) {
        let mut hover = HoverState::new();
        let now = Instant::now();
        hover.enter(region(0));
        let ids: Vec<_> = (0..leaves).map(|_| hover.leave(now, DEFAULT_HOVER_GRACE)).collect();

        for id in &ids[..ids.len() - 1] {
            prop_assert!(!hover.fire(*id));
        }
        prop_assert!(hover.hovered().is_some());
        prop_assert!(hover.fire(ids[ids.len() - 1]));
        prop_assert!(hover.hovered().is_none());
    }
}
