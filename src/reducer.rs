//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, LOADING_ANIM_CYCLE_TICKS, TIPS_ERROR_MESSAGE, VALIDATION_MESSAGE};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Form actions =====
        Action::FormLocationChange(location) => {
            state.form.location = location;
            state.validation = None;
            DispatchResult::changed()
        }

        Action::FormHabitsChange(habits) => {
            state.form.habits = habits;
            state.validation = None;
            DispatchResult::changed()
        }

        Action::FormFocusNext | Action::FormFocusPrev => {
            // Two inputs: next and previous are the same move
            state.focus = state.focus.next();
            DispatchResult::changed()
        }

        // ===== Tips actions =====
        Action::TipsSubmit => {
            if !state.can_submit() {
                return DispatchResult::unchanged();
            }
            if !state.form.is_complete() {
                state.validation = Some(VALIDATION_MESSAGE.to_string());
                return DispatchResult::changed();
            }

            state.validation = None;
            state.tips = DataResource::Loading;
            state.card_offset = 0;
            state.tick_count = 0;
            state.loading_anim_ticks_remaining = 0;
            DispatchResult::changed_with(Effect::FetchTips {
                location: state.form.location.trim().to_string(),
                habits: state.form.habits.trim().to_string(),
            })
        }

        Action::TipsDidLoad(lines) => {
            state.tips = DataResource::Loaded(lines);
            state.card_offset = 0;
            state.loading_anim_ticks_remaining = ticks_to_phase_zero(state.tick_count);
            DispatchResult::changed()
        }

        Action::TipsDidError(_) => {
            state.tips = DataResource::Failed(TIPS_ERROR_MESSAGE.to_string());
            state.card_offset = 0;
            state.loading_anim_ticks_remaining = ticks_to_phase_zero(state.tick_count);
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiScrollDown => {
            let last = state.cards().len().saturating_sub(1);
            if state.card_offset < last {
                state.card_offset += 1;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::UiScrollUp => {
            if state.card_offset > 0 {
                state.card_offset -= 1;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.loading_anim_active() {
                state.tick_count = state.tick_count.wrapping_add(1);
                if state.loading_anim_ticks_remaining > 0 {
                    state.loading_anim_ticks_remaining -= 1;
                }
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn ticks_to_phase_zero(tick_count: u32) -> u32 {
    let cycle = LOADING_ANIM_CYCLE_TICKS.max(1);
    if tick_count == 0 {
        return cycle;
    }
    let remainder = tick_count % cycle;
    if remainder == 0 {
        0
    } else {
        cycle - remainder
    }
}
