//! Shared comparison logic for both classifier variants.
//!
//! An `Expectation` is either a fixed window (`[min, max]`, inclusive) or a
//! tolerance band around a single target time. Classification yields a
//! `Verdict`; advice text is derived from the verdict's direction only, as a
//! sentence for the window variant and as a bare phrase for the band.

use serde::{Deserialize, Serialize};

use crate::roast::TargetWindow;

pub const ADVICE_GRIND_FINER: &str = "grind finer";
pub const ADVICE_GRIND_COARSER: &str = "grind coarser";
pub const WINDOW_ADVICE_GRIND_FINER: &str = "grind finer.";
pub const WINDOW_ADVICE_GRIND_COARSER: &str = "grind coarser.";

/// Deviation (percent of target) still considered a balanced extraction.
pub const PERFECT_TOLERANCE_PCT: f64 = 8.0;
/// Deviation (percent of target) that only needs a minor correction.
pub const GOOD_TOLERANCE_PCT: f64 = 15.0;

/// Slack, relative to the target, granted at a band threshold. Typed decimal
/// times such as 32.2 s against 28 s sit exactly on 15% but are not exactly
/// representable in binary.
const THRESHOLD_REL_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Perfect,
    TooFast,
    TooSlow,
    Good,
    Bad,
}

impl Feedback {
    pub fn as_str(self) -> &'static str {
        match self {
            Feedback::Perfect => "perfect",
            Feedback::TooFast => "too_fast",
            Feedback::TooSlow => "too_slow",
            Feedback::Good => "good",
            Feedback::Bad => "bad",
        }
    }
}

impl core::fmt::Display for Feedback {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the expectation a shot fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Ran faster than expected (under-extraction).
    Fast,
    /// Ran slower than expected (over-extraction).
    Slow,
}

impl Direction {
    pub fn advice(self) -> &'static str {
        match self {
            Direction::Fast => ADVICE_GRIND_FINER,
            Direction::Slow => ADVICE_GRIND_COARSER,
        }
    }

    /// Advice phrased as a sentence, used by the window variant.
    pub fn window_advice(self) -> &'static str {
        match self {
            Direction::Fast => WINDOW_ADVICE_GRIND_FINER,
            Direction::Slow => WINDOW_ADVICE_GRIND_COARSER,
        }
    }
}

/// Tolerance band: `target ± perfect_pct` is perfect, `± good_pct` is good.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToleranceBand {
    target_s: f64,
    perfect_pct: f64,
    good_pct: f64,
}

impl ToleranceBand {
    /// Band with the fixed 8% / 15% thresholds.
    pub fn around(target_s: f64) -> Self {
        debug_assert!(target_s > 0.0, "tolerance band target must be positive");
        Self {
            target_s,
            perfect_pct: PERFECT_TOLERANCE_PCT,
            good_pct: GOOD_TOLERANCE_PCT,
        }
    }

    #[inline]
    pub fn target_s(&self) -> f64 {
        self.target_s
    }

    /// `|time - target| / target * 100`.
    #[inline]
    pub fn deviation_pct(&self, time_s: f64) -> f64 {
        (time_s - self.target_s).abs() / self.target_s * 100.0
    }

    /// Inclusive threshold test done on absolute seconds; `deviation_pct` is
    /// for reporting only.
    fn within(&self, time_s: f64, pct: f64) -> bool {
        let limit = self.target_s * pct / 100.0 + self.target_s * THRESHOLD_REL_EPS;
        (time_s - self.target_s).abs() <= limit
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expectation {
    Window(TargetWindow),
    Band(ToleranceBand),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub feedback: Feedback,
    /// `None` when the shot is perfect.
    pub direction: Option<Direction>,
    /// Corrective instruction; empty for a perfect shot.
    pub advice: &'static str,
    /// Distance from the expectation in percent: for a band, relative to the
    /// target; for a window, relative to the violated bound (0 inside).
    pub deviation_pct: f64,
}

impl Expectation {
    pub fn classify(&self, time_s: f64) -> Verdict {
        match self {
            Expectation::Window(w) => {
                if time_s < w.min_s() {
                    Verdict {
                        feedback: Feedback::TooFast,
                        direction: Some(Direction::Fast),
                        advice: Direction::Fast.window_advice(),
                        deviation_pct: (w.min_s() - time_s) / w.min_s() * 100.0,
                    }
                } else if time_s > w.max_s() {
                    Verdict {
                        feedback: Feedback::TooSlow,
                        direction: Some(Direction::Slow),
                        advice: Direction::Slow.window_advice(),
                        deviation_pct: (time_s - w.max_s()) / w.max_s() * 100.0,
                    }
                } else {
                    Verdict {
                        feedback: Feedback::Perfect,
                        direction: None,
                        advice: "",
                        deviation_pct: 0.0,
                    }
                }
            }
            Expectation::Band(b) => {
                let deviation_pct = b.deviation_pct(time_s);
                let direction = if time_s < b.target_s {
                    Direction::Fast
                } else {
                    Direction::Slow
                };
                if b.within(time_s, b.perfect_pct) {
                    Verdict {
                        feedback: Feedback::Perfect,
                        direction: None,
                        advice: "",
                        deviation_pct,
                    }
                } else if b.within(time_s, b.good_pct) {
                    Verdict {
                        feedback: Feedback::Good,
                        direction: Some(direction),
                        advice: direction.advice(),
                        deviation_pct,
                    }
                } else {
                    Verdict {
                        feedback: Feedback::Bad,
                        direction: Some(direction),
                        advice: direction.advice(),
                        deviation_pct,
                    }
                }
            }
        }
    }
}
