//! EcoTips - sustainability tips in the terminal
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod categorize;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod markdown;
pub mod reducer;
pub mod state;
