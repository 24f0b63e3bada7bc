//! Roast descriptors and the extraction window table.
//!
//! Two scales exist: the five-level ordinal scale (1 = lightest, 5 = darkest),
//! which is authoritative, and the legacy three-category scale kept for
//! compatibility. Both map to a fixed `[min, max]` window in seconds.

use serde::{Deserialize, Serialize};

use crate::error::{DialInError, InputField};

/// Roast level on the five-level scale. Always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RoastLevel(u8);

impl RoastLevel {
    pub const LIGHTEST: Self = Self(1);
    pub const MEDIUM: Self = Self(3);
    pub const DARKEST: Self = Self(5);

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// All levels, lightest first.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=5).map(Self)
    }
}

/// Level used whenever a bean carries no roast information.
pub const DEFAULT_ROAST_LEVEL: RoastLevel = RoastLevel::MEDIUM;

impl TryFrom<u8> for RoastLevel {
    type Error = DialInError;
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        if (1..=5).contains(&v) {
            Ok(Self(v))
        } else {
            Err(DialInError::RoastLevelOutOfRange(v))
        }
    }
}

impl From<RoastLevel> for u8 {
    fn from(level: RoastLevel) -> Self {
        level.0
    }
}

impl core::fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Legacy three-category roast scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoastCategory {
    Light,
    Medium,
    Dark,
}

impl RoastCategory {
    pub const ALL: [RoastCategory; 3] = [RoastCategory::Light, RoastCategory::Medium, RoastCategory::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            RoastCategory::Light => "light",
            RoastCategory::Medium => "medium",
            RoastCategory::Dark => "dark",
        }
    }
}

impl core::fmt::Display for RoastCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which roast scale the caller speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoastScale {
    #[default]
    FiveLevel,
    ThreeCategory,
}

impl RoastScale {
    /// Descriptor used when the caller supplies none. The three-category scale
    /// has no numeric levels, so it always falls back to `medium`.
    pub fn default_descriptor(self, level: RoastLevel) -> RoastDescriptor {
        match self {
            RoastScale::FiveLevel => RoastDescriptor::Level(level),
            RoastScale::ThreeCategory => RoastDescriptor::Category(RoastCategory::Medium),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoastDescriptor {
    Level(RoastLevel),
    Category(RoastCategory),
}

impl From<RoastLevel> for RoastDescriptor {
    fn from(level: RoastLevel) -> Self {
        RoastDescriptor::Level(level)
    }
}

impl From<RoastCategory> for RoastDescriptor {
    fn from(category: RoastCategory) -> Self {
        RoastDescriptor::Category(category)
    }
}

impl core::fmt::Display for RoastDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RoastDescriptor::Level(l) => write!(f, "level {l}"),
            RoastDescriptor::Category(c) => write!(f, "{c}"),
        }
    }
}

/// Acceptable extraction time range in seconds, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetWindow {
    min_s: f64,
    max_s: f64,
}

impl TargetWindow {
    const fn fixed(min_s: f64, max_s: f64) -> Self {
        Self { min_s, max_s }
    }

    /// Caller-defined window. Both bounds must be positive and `min <= max`.
    pub fn new(min_s: f64, max_s: f64) -> Result<Self, DialInError> {
        if !(min_s.is_finite() && min_s > 0.0) {
            return Err(DialInError::InsufficientInput(InputField::TargetMin));
        }
        if !(max_s.is_finite() && max_s > 0.0) {
            return Err(DialInError::InsufficientInput(InputField::TargetMax));
        }
        if min_s > max_s {
            return Err(DialInError::InvertedWindow {
                min: min_s,
                max: max_s,
            });
        }
        Ok(Self { min_s, max_s })
    }

    #[inline]
    pub fn min_s(&self) -> f64 {
        self.min_s
    }

    #[inline]
    pub fn max_s(&self) -> f64 {
        self.max_s
    }

    #[inline]
    pub fn contains(&self, time_s: f64) -> bool {
        time_s >= self.min_s && time_s <= self.max_s
    }
}

const FIVE_LEVEL_WINDOWS: [TargetWindow; 5] = [
    TargetWindow::fixed(20.0, 28.0), // lightest
    TargetWindow::fixed(22.0, 29.0),
    TargetWindow::fixed(25.0, 30.0), // medium
    TargetWindow::fixed(28.0, 33.0),
    TargetWindow::fixed(30.0, 35.0), // darkest
];

const LIGHT_WINDOW: TargetWindow = TargetWindow::fixed(20.0, 28.0);
const MEDIUM_WINDOW: TargetWindow = TargetWindow::fixed(25.0, 30.0);
const DARK_WINDOW: TargetWindow = TargetWindow::fixed(30.0, 35.0);

/// Extraction window for a roast descriptor. Total over the closed domain.
pub fn extraction_window(descriptor: RoastDescriptor) -> TargetWindow {
    match descriptor {
        RoastDescriptor::Level(level) => FIVE_LEVEL_WINDOWS[usize::from(level.get() - 1)],
        RoastDescriptor::Category(RoastCategory::Light) => LIGHT_WINDOW,
        RoastDescriptor::Category(RoastCategory::Medium) => MEDIUM_WINDOW,
        RoastDescriptor::Category(RoastCategory::Dark) => DARK_WINDOW,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_is_a_proper_window() {
        let descriptors = RoastLevel::all()
            .map(RoastDescriptor::from)
            .chain(RoastCategory::ALL.into_iter().map(RoastDescriptor::from));
        for d in descriptors {
            let w = extraction_window(d);
            assert!(w.min_s() > 0.0, "{d}: min must be positive");
            assert!(w.min_s() < w.max_s(), "{d}: min must be < max");
        }
    }

    #[test]
    fn five_level_table_matches_reference_values() {
        let expected = [(20.0, 28.0), (22.0, 29.0), (25.0, 30.0), (28.0, 33.0), (30.0, 35.0)];
        for (level, (min, max)) in RoastLevel::all().zip(expected) {
            let w = extraction_window(level.into());
            assert_eq!((w.min_s(), w.max_s()), (min, max), "level {level}");
        }
    }

    #[test]
    fn three_category_table_matches_reference_values() {
        let light = extraction_window(RoastCategory::Light.into());
        let medium = extraction_window(RoastCategory::Medium.into());
        let dark = extraction_window(RoastCategory::Dark.into());
        assert_eq!((light.min_s(), light.max_s()), (20.0, 28.0));
        assert_eq!((medium.min_s(), medium.max_s()), (25.0, 30.0));
        assert_eq!((dark.min_s(), dark.max_s()), (30.0, 35.0));
    }

    #[test]
    fn roast_level_rejects_out_of_range() {
        assert_eq!(RoastLevel::try_from(0), Err(DialInError::RoastLevelOutOfRange(0)));
        assert_eq!(RoastLevel::try_from(6), Err(DialInError::RoastLevelOutOfRange(6)));
        assert_eq!(RoastLevel::try_from(3), Ok(DEFAULT_ROAST_LEVEL));
    }

    #[test]
    fn roast_level_deserialization_is_validated() {
        let ok: RoastLevel = serde_json::from_str("4").unwrap();
        assert_eq!(ok.get(), 4);
        assert!(serde_json::from_str::<RoastLevel>("9").is_err());
    }

    #[test]
    fn window_constructor_validates_bounds() {
        assert!(TargetWindow::new(25.0, 30.0).is_ok());
        assert!(TargetWindow::new(30.0, 30.0).is_ok());
        assert_eq!(
            TargetWindow::new(0.0, 30.0),
            Err(DialInError::InsufficientInput(InputField::TargetMin))
        );
        assert_eq!(
            TargetWindow::new(25.0, -1.0),
            Err(DialInError::InsufficientInput(InputField::TargetMax))
        );
        assert_eq!(
            TargetWindow::new(31.0, 30.0),
            Err(DialInError::InvertedWindow { min: 31.0, max: 30.0 })
        );
    }
}
