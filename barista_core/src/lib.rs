#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Espresso dial-in logic (storage- and UI-agnostic).
//!
//! ## Architecture
//!
//! - **Roast table**: five-level and legacy three-category windows (`roast`)
//! - **Expectation**: window or tolerance band, shared verdict and advice (`expectation`)
//! - **Ratio/window classifier**: `calculate_dial_in`, `calculate_dial_in_with_window`
//! - **Timer-driven classifier**: drink timing model plus band (`smart`)
//! - **Stopwatch**: shot timer over an injectable clock (`stopwatch`)
//! - **Records**: beans, people and recipes, history, maintenance, settings
//!
//! Classifiers never fail loudly: the `calculate_*` entry points return `None`
//! when there is not enough data, and the `try_*` forms say which field was bad.

pub mod config;
pub mod conversions;
pub mod dial_in;
pub mod error;
pub mod expectation;
pub mod records;
pub mod roast;
pub mod smart;
pub mod stopwatch;

pub use config::{BrewDefaults, RetentionCfg};
pub use dial_in::{
    BrewMeasurement, DialInResult, calculate_dial_in, calculate_dial_in_with_window, try_dial_in,
    try_dial_in_with_bounds,
};
pub use error::{DialInError, InputField, RecordError};
pub use expectation::{Direction, Expectation, Feedback, ToleranceBand, Verdict};
pub use roast::{
    DEFAULT_ROAST_LEVEL, RoastCategory, RoastDescriptor, RoastLevel, RoastScale, TargetWindow,
    extraction_window,
};
pub use smart::{
    DrinkType, SmartDialInResult, calculate_smart_dial_in, target_time, try_smart_dial_in,
};
pub use stopwatch::{Stopwatch, StopwatchState};

/// Window the ratio classifier should use: an explicit override wins, then the
/// caller's descriptor, then the configured default.
pub fn resolve_window(defaults: &BrewDefaults, roast: Option<RoastDescriptor>) -> TargetWindow {
    defaults
        .window_override
        .unwrap_or_else(|| extraction_window(roast.unwrap_or_else(|| defaults.default_descriptor())))
}
