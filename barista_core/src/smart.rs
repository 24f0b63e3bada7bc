//! Timer-driven dial-in: drink-type timing model plus tolerance classifier.
//!
//! target = base(drink) + (3 - roast_level) * 2 seconds. Darker roasts extract
//! faster, so their target is shorter. The measured time is then compared to
//! the target with the 8% / 15% tolerance band.

use serde::{Deserialize, Serialize};

use crate::error::{DialInError, InputField};
use crate::expectation::{Direction, Expectation, Feedback, ToleranceBand};
use crate::roast::RoastLevel;

/// Roast level at which no adjustment is applied.
pub const ROAST_PIVOT: u8 = 3;
/// Seconds added per step lighter than the pivot (subtracted per step darker).
pub const SECS_PER_ROAST_STEP: f64 = 2.0;

pub const MSG_BALANCED: &str = "Excellent extraction! The flavors are balanced.";
pub const MSG_SLIGHTLY_FAST: &str = "A little fast. A small grind adjustment will get you there.";
pub const MSG_SLIGHTLY_SLOW: &str = "A little slow. A small grind adjustment will get you there.";
pub const MSG_FAR_TOO_FAST: &str = "Far too fast! The grind needs a significant change.";
pub const MSG_FAR_TOO_SLOW: &str = "Far too slow! The grind needs a significant change.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrinkType {
    /// Short shot.
    Ristretto,
    /// Standard shot.
    Espresso,
    /// Long shot.
    Lungo,
}

impl DrinkType {
    pub const ALL: [DrinkType; 3] = [DrinkType::Ristretto, DrinkType::Espresso, DrinkType::Lungo];

    pub const fn base_time_s(self) -> f64 {
        match self {
            DrinkType::Ristretto => 22.0,
            DrinkType::Espresso => 28.0,
            DrinkType::Lungo => 34.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DrinkType::Ristretto => "ristretto",
            DrinkType::Espresso => "espresso",
            DrinkType::Lungo => "lungo",
        }
    }
}

impl core::fmt::Display for DrinkType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target extraction time for a drink at a roast level.
pub fn target_time(drink: DrinkType, roast: RoastLevel) -> f64 {
    let steps = f64::from(ROAST_PIVOT) - f64::from(roast.get());
    let target = drink.base_time_s() + steps * SECS_PER_ROAST_STEP;
    // Shortest possible target is 22 - 2*2 = 18 s.
    debug_assert!(target > 0.0, "target time must stay positive, got {target}");
    target
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartDialInResult {
    pub drink_type: DrinkType,
    pub roast_level: RoastLevel,
    pub target_time: f64,
    /// The measured time, echoed back.
    pub actual_time: f64,
    pub deviation_pct: f64,
    pub feedback: Feedback,
    pub message: String,
    pub advice: String,
}

fn band_message(feedback: Feedback, direction: Option<Direction>) -> &'static str {
    match (feedback, direction) {
        (Feedback::Good, Some(Direction::Fast)) => MSG_SLIGHTLY_FAST,
        (Feedback::Good, _) => MSG_SLIGHTLY_SLOW,
        (Feedback::Bad, Some(Direction::Fast)) => MSG_FAR_TOO_FAST,
        (Feedback::Bad, _) => MSG_FAR_TOO_SLOW,
        _ => MSG_BALANCED,
    }
}

pub fn try_smart_dial_in(
    drink: DrinkType,
    roast: RoastLevel,
    time_s: f64,
) -> Result<SmartDialInResult, DialInError> {
    if !(time_s.is_finite() && time_s > 0.0) {
        return Err(DialInError::InsufficientInput(InputField::Time));
    }
    let target = target_time(drink, roast);
    let verdict = Expectation::Band(ToleranceBand::around(target)).classify(time_s);
    tracing::debug!(
        drink = %drink,
        roast = roast.get(),
        target_s = target,
        time_s,
        deviation_pct = verdict.deviation_pct,
        feedback = %verdict.feedback,
        "smart dial-in classified"
    );
    Ok(SmartDialInResult {
        drink_type: drink,
        roast_level: roast,
        target_time: target,
        actual_time: time_s,
        deviation_pct: verdict.deviation_pct,
        feedback: verdict.feedback,
        message: band_message(verdict.feedback, verdict.direction).to_string(),
        advice: verdict.advice.to_string(),
    })
}

/// Returns `None` when the measured time is not a positive number.
pub fn calculate_smart_dial_in(
    drink: DrinkType,
    roast: RoastLevel,
    time_s: f64,
) -> Option<SmartDialInResult> {
    try_smart_dial_in(drink, roast, time_s).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_time_spans_expected_range() {
        assert_eq!(target_time(DrinkType::Ristretto, RoastLevel::DARKEST), 18.0);
        assert_eq!(target_time(DrinkType::Lungo, RoastLevel::LIGHTEST), 38.0);
        for drink in DrinkType::ALL {
            assert_eq!(target_time(drink, RoastLevel::MEDIUM), drink.base_time_s());
        }
    }

    #[test]
    fn non_positive_time_has_no_result() {
        assert!(calculate_smart_dial_in(DrinkType::Espresso, RoastLevel::MEDIUM, 0.0).is_none());
        assert_eq!(
            try_smart_dial_in(DrinkType::Espresso, RoastLevel::MEDIUM, f64::NAN).unwrap_err(),
            DialInError::InsufficientInput(InputField::Time)
        );
    }

    #[test]
    fn messages_distinguish_direction_and_severity() {
        let r = |t| calculate_smart_dial_in(DrinkType::Ristretto, RoastLevel::MEDIUM, t).unwrap();
        assert_eq!(r(22.0).message, MSG_BALANCED);
        assert_eq!(r(20.0).message, MSG_SLIGHTLY_FAST);
        assert_eq!(r(24.0).message, MSG_SLIGHTLY_SLOW);
        assert_eq!(r(17.0).message, MSG_FAR_TOO_FAST);
        assert_eq!(r(27.0).message, MSG_FAR_TOO_SLOW);
    }
}
