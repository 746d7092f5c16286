//! Runtime configuration resolved from CLI flags and environment

use std::path::PathBuf;

use crate::state::{AppState, TipForm};

/// Used when neither `--api-url` nor `ECOTIPS_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub location: String,
    pub habits: String,
    /// Submit the prefilled form as soon as the app starts
    pub submit_on_start: bool,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            location: String::new(),
            habits: String::new(),
            submit_on_start: false,
            log_file: None,
            verbose: false,
        }
    }
}

impl Config {
    pub fn initial_form(&self) -> TipForm {
        TipForm::new(self.location.clone(), self.habits.clone())
    }

    pub fn initial_state(&self) -> AppState {
        AppState::new(self.initial_form())
    }
}
