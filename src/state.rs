//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::categorize::{categorize, TipCard};

/// Message shown for any failed tip request.
pub const TIPS_ERROR_MESSAGE: &str = "Failed to generate tips. Please try again.";

/// Message shown when submit is pressed with an empty field.
pub const VALIDATION_MESSAGE: &str = "Please fill in both your location and your habits.";

/// Animation timing for the header gradient seam.
pub const LOADING_ANIM_TICK_MS: u64 = 15;
pub const LOADING_ANIM_CYCLE_TICKS: u32 = 60;

/// The two form inputs
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TipForm {
    pub location: String,
    pub habits: String,
}

impl TipForm {
    pub fn new(location: impl Into<String>, habits: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            habits: habits.into(),
        }
    }

    /// Both fields are required
    pub fn is_complete(&self) -> bool {
        !self.location.trim().is_empty() && !self.habits.trim().is_empty()
    }
}

/// Which input receives typed text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FormField {
    #[default]
    Location,
    Habits,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Location => FormField::Habits,
            FormField::Habits => FormField::Location,
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Form", label = "Fields", debug_fmt)]
    pub form: TipForm,

    #[debug(section = "Form", label = "Focus", debug_fmt)]
    pub focus: FormField,

    #[debug(section = "Form", label = "Validation", debug_fmt)]
    pub validation: Option<String>,

    /// Tip lines lifecycle: Empty -> Loading -> Loaded/Failed
    #[debug(section = "Tips", label = "Lines", debug_fmt)]
    pub tips: DataResource<Vec<String>>,

    /// Index of the first visible card
    #[debug(section = "Tips", label = "Card offset")]
    pub card_offset: usize,

    #[debug(skip)]
    pub tick_count: u32,

    /// Remaining ticks to finish the current animation cycle after loading
    #[debug(skip)]
    pub loading_anim_ticks_remaining: u32,
}

impl AppState {
    pub fn new(form: TipForm) -> Self {
        Self {
            form,
            focus: FormField::default(),
            validation: None,
            tips: DataResource::Empty,
            card_offset: 0,
            tick_count: 0,
            loading_anim_ticks_remaining: 0,
        }
    }

    /// Submission is disabled while a request is in flight
    pub fn can_submit(&self) -> bool {
        !self.tips.is_loading()
    }

    /// Cards derived from the current tip lines
    pub fn cards(&self) -> Vec<TipCard> {
        self.tips
            .data()
            .map(|lines| categorize(lines.as_slice()))
            .unwrap_or_default()
    }

    pub fn loading_anim_active(&self) -> bool {
        self.tips.is_loading() || self.loading_anim_ticks_remaining > 0
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TipForm::default())
    }
}
