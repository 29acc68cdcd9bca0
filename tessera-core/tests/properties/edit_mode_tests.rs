//! Property-based tests for the edit-mode state machine

use proptest::prelude::*;
use tessera_core::testing::RecordingBroadcast;
use tessera_core::{EditModeController, EditState, TreePath};

#[derive(Debug, Clone)]
enum Op {
    Toggle,
    Target(Option<String>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Toggle),
        proptest::option::of("[a-z]{1,4}(/[a-z]{1,4}){0,2}").prop_map(Op::Target),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Feature: edit-mode, Property 1: Double Toggle**
    ///
    /// Toggling twice restores the edit-mode flag and always leaves the
    /// controller without a target.
    #[test]
    fn prop_double_toggle(ops in prop::collection::vec(op_strategy(), 0..20)) {
        let mut controller = EditModeController::new(RecordingBroadcast::new());
        for op in ops {
            match op {
                Op::Toggle => { controller.toggle_edit_mode(); }
                Op::Target(raw) => {
                    controller.set_targeted_path(raw.map(|r| TreePath::parse(&r).unwrap()));
                }
            }
        }
        let before = controller.edit_mode();
        controller.toggle_edit_mode();
        controller.toggle_edit_mode();
        prop_assert_eq!(controller.edit_mode(), before);
        prop_assert!(controller.targeted_path().is_none());
    }

    /// **Feature: edit-mode, Property 2: No Target While Viewing**
    ///
    /// After any sequence of operations, a viewing controller has no target,
    /// and every toggle emits exactly one region refresh notification.
    #[test]
    fn prop_no_target_while_viewing(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let recorder = RecordingBroadcast::new();
        let mut controller = EditModeController::new(recorder.clone());
        let mut toggles = 0;
        for op in ops {
            match op {
                Op::Toggle => {
                    controller.toggle_edit_mode();
                    toggles += 1;
                }
                Op::Target(raw) => {
                    controller.set_targeted_path(raw.map(|r| TreePath::parse(&r).unwrap()));
                }
            }
            if controller.state() == &EditState::Viewing {
                prop_assert!(controller.targeted_path().is_none());
            }
        }
        prop_assert_eq!(recorder.count("extension:*:update"), toggles);
    }
}
