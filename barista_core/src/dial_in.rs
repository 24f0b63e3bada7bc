//! Ratio/window dial-in classifier.
//!
//! Given dose, yield and extraction time, compute the brew ratio and compare
//! the time against a window taken from the roast table or supplied by the
//! caller. Inputs that cannot be classified (non-positive dose, time or window
//! bound) produce no result rather than an error.

use serde::{Deserialize, Serialize};

use crate::error::{DialInError, InputField};
use crate::expectation::{Direction, Expectation, Feedback, Verdict};
use crate::roast::{RoastDescriptor, TargetWindow, extraction_window};

pub const MSG_PERFECT_SHOT: &str = "Perfect shot!";
pub const MSG_TOO_FAST: &str = "Too fast! (under-extraction)";
pub const MSG_TOO_SLOW: &str = "Too slow! (over-extraction)";

/// Raw brew numbers for one shot. Grams and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrewMeasurement {
    pub dose_g: f64,
    pub yield_g: f64,
    pub time_s: f64,
}

impl BrewMeasurement {
    pub fn new(dose_g: f64, yield_g: f64, time_s: f64) -> Self {
        Self {
            dose_g,
            yield_g,
            time_s,
        }
    }

    /// Dose and time must be positive; yield only needs to be a real number
    /// (a zero yield is a valid, if useless, 0.0 ratio).
    pub fn validate(&self) -> Result<(), DialInError> {
        if !(self.dose_g.is_finite() && self.dose_g > 0.0) {
            return Err(DialInError::InsufficientInput(InputField::Dose));
        }
        if !(self.time_s.is_finite() && self.time_s > 0.0) {
            return Err(DialInError::InsufficientInput(InputField::Time));
        }
        if !self.yield_g.is_finite() {
            return Err(DialInError::InsufficientInput(InputField::Yield));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialInResult {
    /// `yield / dose`, unrounded.
    pub ratio: f64,
    /// Window actually used for the comparison.
    pub target_min: f64,
    pub target_max: f64,
    pub feedback: Feedback,
    pub message: String,
    /// Empty when `feedback` is perfect.
    pub advice: String,
}

/// A window verdict only carries a direction when the time fell outside it.
fn window_message(direction: Option<Direction>) -> &'static str {
    match direction {
        None => MSG_PERFECT_SHOT,
        Some(Direction::Fast) => MSG_TOO_FAST,
        Some(Direction::Slow) => MSG_TOO_SLOW,
    }
}

/// Classify a measurement against a window that is already known to be valid.
pub fn try_dial_in(m: &BrewMeasurement, window: TargetWindow) -> Result<DialInResult, DialInError> {
    m.validate()?;
    let ratio = m.yield_g / m.dose_g;
    let verdict: Verdict = Expectation::Window(window).classify(m.time_s);
    tracing::debug!(
        ratio,
        time_s = m.time_s,
        target_min = window.min_s(),
        target_max = window.max_s(),
        feedback = %verdict.feedback,
        "dial-in classified"
    );
    Ok(DialInResult {
        ratio,
        target_min: window.min_s(),
        target_max: window.max_s(),
        feedback: verdict.feedback,
        message: window_message(verdict.direction).to_string(),
        advice: verdict.advice.to_string(),
    })
}

/// Classify against a caller-supplied `[target_min, target_max]` window.
pub fn try_dial_in_with_bounds(
    m: &BrewMeasurement,
    target_min: f64,
    target_max: f64,
) -> Result<DialInResult, DialInError> {
    m.validate()?;
    let window = TargetWindow::new(target_min, target_max)?;
    try_dial_in(m, window)
}

/// Roast-table variant. Returns `None` when there is not enough data to classify.
pub fn calculate_dial_in(
    dose_g: f64,
    yield_g: f64,
    time_s: f64,
    roast: impl Into<RoastDescriptor>,
) -> Option<DialInResult> {
    let window = extraction_window(roast.into());
    try_dial_in(&BrewMeasurement::new(dose_g, yield_g, time_s), window).ok()
}

/// User-defined window variant. Returns `None` for non-positive inputs and for
/// an inverted window.
pub fn calculate_dial_in_with_window(
    dose_g: f64,
    yield_g: f64,
    time_s: f64,
    target_min: f64,
    target_max: f64,
) -> Option<DialInResult> {
    try_dial_in_with_bounds(
        &BrewMeasurement::new(dose_g, yield_g, time_s),
        target_min,
        target_max,
    )
    .ok()
}
