//! Runtime configuration for the dial-in engine.
//!
//! These are separate from the TOML-deserialized config in `barista_config`;
//! see `conversions` for the bridge.

use crate::records::{DEFAULT_FILTER_OVERDUE_DAYS, DEFAULT_HISTORY_CAP};
use crate::roast::{RoastDescriptor, RoastLevel, RoastScale, TargetWindow};
use crate::smart::DrinkType;

/// Defaults applied when the user leaves a brew field blank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrewDefaults {
    /// Dose (g) used to pre-populate a measurement.
    pub dose_g: f64,
    /// Yield / dose used to pre-populate the expected yield.
    pub target_ratio: f64,
    /// Level assumed when neither the caller nor the active bean names one.
    pub roast_level: RoastLevel,
    pub roast_scale: RoastScale,
    /// When set, replaces the roast table for the ratio/window classifier.
    pub window_override: Option<TargetWindow>,
    pub default_drink: DrinkType,
}

impl Default for BrewDefaults {
    fn default() -> Self {
        Self {
            dose_g: 18.0,
            target_ratio: 2.0,
            roast_level: RoastLevel::MEDIUM,
            roast_scale: RoastScale::FiveLevel,
            window_override: None,
            default_drink: DrinkType::Espresso,
        }
    }
}

impl BrewDefaults {
    pub fn default_descriptor(&self) -> RoastDescriptor {
        self.roast_scale.default_descriptor(self.roast_level)
    }

    #[inline]
    pub fn default_yield_g(&self) -> f64 {
        self.dose_g * self.target_ratio
    }
}

/// Retention limits for persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionCfg {
    /// Dial-in records kept, newest first.
    pub history_cap: usize,
    /// Water filter is overdue strictly after this many days.
    pub filter_overdue_days: i64,
}

impl Default for RetentionCfg {
    fn default() -> Self {
        Self {
            history_cap: DEFAULT_HISTORY_CAP,
            filter_overdue_days: DEFAULT_FILTER_OVERDUE_DAYS,
        }
    }
}
