//! Store, component and render flows with EffectStoreTestHarness

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, EventKind};
use ecotips::{
    action::Action,
    components::{AppDisplay, AppDisplayProps, Component},
    effect::Effect,
    reducer::reducer,
    state::{AppState, FormField, TipForm, TIPS_ERROR_MESSAGE, VALIDATION_MESSAGE},
};

fn mock_lines() -> Vec<String> {
    vec![
        "## 1. Quick Wins".into(),
        "Turn off lights".into(),
        "## 2. Sustainable Living".into(),
        "Compost food waste".into(),
    ]
}

fn filled_state() -> AppState {
    AppState::new(TipForm::new("Montreal", "Long winters, gas heating"))
}

/// Render the whole app at 80x40 as plain text
macro_rules! render_app {
    ($harness:expr) => {{
        let mut component = AppDisplay::new();
        $harness.render_plain(80, 40, |frame, area, state| {
            let props = AppDisplayProps {
                state,
                is_focused: true,
            };
            component.render(frame, area, props);
        })
    }};
}

fn press_enter(component: &mut AppDisplay, state: &AppState) -> Vec<Action> {
    let event = EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let props = AppDisplayProps {
        state,
        is_focused: true,
    };
    component.handle_event(&event, props).into_iter().collect()
}

// ============================================================================
// Request flow
// ============================================================================

#[test]
fn test_submit_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(filled_state(), reducer);

    harness.dispatch_collect(Action::TipsSubmit);
    harness.assert_state(|s| s.tips.is_loading());
    harness.assert_state(|s| !s.can_submit());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::FetchTips { location, habits }
            if location == "Montreal" && habits == "Long winters, gas heating")
    });

    harness.complete_action(Action::TipsDidLoad(mock_lines()));
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");

    harness.assert_state(|s| s.tips.is_loaded());
    harness.assert_state(|s| s.cards().len() == 2);
    harness.assert_state(|s| s.can_submit());
}

#[test]
fn test_error_flow() {
    let mut harness = EffectStoreTestHarness::new(filled_state(), reducer);

    harness.dispatch_collect(Action::TipsSubmit);
    harness.complete_action(Action::TipsDidError("503 Service Unavailable".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.tips.is_failed());
    harness.assert_state(|s| s.tips.error() == Some(TIPS_ERROR_MESSAGE));
    harness.assert_state(|s| s.cards().is_empty());
    harness.assert_state(|s| s.can_submit());
}

#[test]
fn test_resubmit_after_error_clears_banner() {
    let mut harness = EffectStoreTestHarness::new(filled_state(), reducer);

    harness.dispatch_collect(Action::TipsSubmit);
    harness.complete_action(Action::TipsDidError("timeout".into()));
    harness.process_emitted();
    harness.drain_effects();

    harness.dispatch_collect(Action::TipsSubmit);
    harness.assert_state(|s| s.tips.error().is_none());

    let effects = harness.drain_effects();
    effects.effects_count(1);
}

#[test]
fn test_double_submit_issues_one_request() {
    let mut harness = EffectStoreTestHarness::new(filled_state(), reducer);

    let results = harness.dispatch_all([Action::TipsSubmit, Action::TipsSubmit]);
    assert_eq!(results, vec![true, false]);

    let effects = harness.drain_effects();
    effects.effects_count(1);
}

#[test]
fn test_empty_location_blocks_request() {
    let mut harness =
        EffectStoreTestHarness::new(AppState::new(TipForm::new("", "I fly a lot")), reducer);

    harness.dispatch_collect(Action::TipsSubmit);

    let effects = harness.drain_effects();
    effects.effects_empty();
    harness.assert_state(|s| s.validation.as_deref() == Some(VALIDATION_MESSAGE));
    harness.assert_state(|s| s.tips.is_empty());
}

// ============================================================================
// Component + Store Integration Tests
// ============================================================================

#[test]
fn test_enter_in_habits_submits() {
    let mut harness = EffectStoreTestHarness::new(filled_state(), reducer);
    let mut component = AppDisplay::new();

    harness.dispatch_collect(Action::FormFocusNext);
    harness.assert_state(|s| s.focus == FormField::Habits);

    let state = AppState {
        focus: FormField::Habits,
        ..filled_state()
    };
    let actions = press_enter(&mut component, &state);
    actions.assert_first(Action::TipsSubmit);

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.tips.is_loading());
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::FetchTips { .. }));
}

#[test]
fn test_enter_in_location_moves_focus() {
    let mut harness = EffectStoreTestHarness::new(filled_state(), reducer);
    let mut component = AppDisplay::new();

    let actions = press_enter(&mut component, &filled_state());
    actions.assert_first(Action::FormFocusNext);

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.focus == FormField::Habits);
    harness.drain_effects().effects_empty();
}

// ============================================================================
// Render Tests with Harness
// ============================================================================

#[test]
fn test_render_cards_after_load() {
    let mut harness = EffectStoreTestHarness::new(filled_state(), reducer);

    harness.dispatch_collect(Action::TipsSubmit);
    harness.complete_action(Action::TipsDidLoad(mock_lines()));
    harness.process_emitted();

    let output = render_app!(harness);

    assert!(
        output.contains("Quick Wins") && output.contains("Sustainable Living"),
        "Both cards should be visible in output:\n{}",
        output
    );
    assert!(output.contains("Turn off lights"));
    assert!(output.contains("Compost food waste"));
    assert!(output.contains("1 tip"));
}

#[test]
fn test_render_error_banner() {
    let mut harness = EffectStoreTestHarness::new(filled_state(), reducer);

    harness.dispatch_collect(Action::TipsSubmit);
    harness.complete_action(Action::TipsDidError("dns failure".into()));
    harness.process_emitted();

    let output = render_app!(harness);

    assert!(
        output.contains(TIPS_ERROR_MESSAGE),
        "Error banner should be visible in output:\n{}",
        output
    );
    assert!(!output.contains("dns failure"), "Detail must not leak to the UI");
    assert!(output.contains("Get Tips"), "Submit should be enabled again");
}

#[test]
fn test_render_stray_lines_show_no_cards() {
    let mut harness = EffectStoreTestHarness::new(filled_state(), reducer);

    harness.complete_action(Action::TipsDidLoad(vec!["Just a stray line".into()]));
    harness.process_emitted();

    let output = render_app!(harness);

    assert!(!output.contains("Just a stray line"));
}

#[test]
fn test_render_scrolling_changes_display() {
    let state = AppState {
        tips: DataResource::Loaded(mock_lines()),
        ..filled_state()
    };
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    let before = render_app!(harness);
    harness.dispatch_collect(Action::UiScrollDown);
    let after = render_app!(harness);

    assert_ne!(before, after, "Scrolling should change the visible cards");
    assert!(!after.contains("Turn off lights"));
}
