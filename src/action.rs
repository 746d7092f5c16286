//! Actions - everything that can happen to the app

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Form category =====
    /// Location input text changed
    FormLocationChange(String),

    /// Habits input text changed
    FormHabitsChange(String),

    /// Move focus to the next input
    FormFocusNext,

    /// Move focus to the previous input
    FormFocusPrev,

    // ===== Tips category =====
    /// Intent: submit the form (triggers async task when valid)
    TipsSubmit,

    /// Result: tip lines returned by the service
    TipsDidLoad(Vec<String>),

    /// Result: tip request failed (detail is for logs only)
    TipsDidError(String),

    // ===== UI category =====
    /// Scroll cards down by one
    UiScrollDown,

    /// Scroll cards up by one
    UiScrollUp,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for loading animation
    Tick,

    /// Exit the application
    Quit,
}
