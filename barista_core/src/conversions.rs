//! Conversions bridging `barista_config` types to `barista_core` types.
//!
//! Config validation already rejects out-of-range values; the fallible
//! conversions here re-check so a hand-built `Config` cannot slip through.

use barista_config::{BeanRow, Config, DrinkCfg, RoastScaleCfg, WindowCfg};

use crate::config::{BrewDefaults, RetentionCfg};
use crate::error::{DialInError, RecordError};
use crate::records::NewBean;
use crate::roast::{RoastLevel, RoastScale, TargetWindow};
use crate::smart::DrinkType;

// ── Enums ────────────────────────────────────────────────────────────────────

impl From<DrinkCfg> for DrinkType {
    fn from(c: DrinkCfg) -> Self {
        match c {
            DrinkCfg::Ristretto => DrinkType::Ristretto,
            DrinkCfg::Espresso => DrinkType::Espresso,
            DrinkCfg::Lungo => DrinkType::Lungo,
        }
    }
}

impl From<RoastScaleCfg> for RoastScale {
    fn from(c: RoastScaleCfg) -> Self {
        match c {
            RoastScaleCfg::FiveLevel => RoastScale::FiveLevel,
            RoastScaleCfg::ThreeCategory => RoastScale::ThreeCategory,
        }
    }
}

// ── Window ───────────────────────────────────────────────────────────────────

impl TryFrom<&WindowCfg> for TargetWindow {
    type Error = DialInError;
    fn try_from(c: &WindowCfg) -> Result<Self, Self::Error> {
        TargetWindow::new(c.min_s, c.max_s)
    }
}

// ── BrewDefaults ─────────────────────────────────────────────────────────────

impl TryFrom<&Config> for BrewDefaults {
    type Error = DialInError;
    fn try_from(c: &Config) -> Result<Self, Self::Error> {
        Ok(Self {
            dose_g: c.brew.default_dose_g,
            target_ratio: c.brew.target_ratio,
            roast_level: RoastLevel::try_from(c.brew.default_roast_level)?,
            roast_scale: c.brew.roast_scale.into(),
            window_override: c.window.as_ref().map(TargetWindow::try_from).transpose()?,
            default_drink: c.smart.default_drink.into(),
        })
    }
}

// ── RetentionCfg ─────────────────────────────────────────────────────────────

impl From<&Config> for RetentionCfg {
    fn from(c: &Config) -> Self {
        Self {
            history_cap: c.storage.history_cap,
            filter_overdue_days: c.maintenance.filter_overdue_days,
        }
    }
}

// ── Bean import ──────────────────────────────────────────────────────────────

impl TryFrom<BeanRow> for NewBean {
    type Error = RecordError;
    fn try_from(row: BeanRow) -> Result<Self, Self::Error> {
        let roast_level = row
            .roast_level
            .map(RoastLevel::try_from)
            .transpose()
            .map_err(|e| RecordError::Invalid {
                field: "roast_level",
                reason: e.to_string(),
            })?;
        let bean = NewBean {
            roaster_name: row.roaster,
            bean_name: row.bean,
            grind_setting: row.grind,
            roast_level,
            ..NewBean::default()
        };
        bean.validate()?;
        Ok(bean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_maps_to_default_brew() {
        let cfg = Config::default();
        let brew = BrewDefaults::try_from(&cfg).unwrap();
        assert_eq!(brew, BrewDefaults::default());
        assert_eq!(RetentionCfg::from(&cfg), RetentionCfg::default());
    }

    #[test]
    fn window_override_is_carried_and_checked() {
        let mut cfg = Config::default();
        cfg.window = Some(WindowCfg { min_s: 24.0, max_s: 31.0 });
        let brew = BrewDefaults::try_from(&cfg).unwrap();
        let w = brew.window_override.unwrap();
        assert_eq!((w.min_s(), w.max_s()), (24.0, 31.0));

        cfg.window = Some(WindowCfg { min_s: 31.0, max_s: 24.0 });
        assert!(matches!(
            BrewDefaults::try_from(&cfg),
            Err(DialInError::InvertedWindow { .. })
        ));
    }

    #[test]
    fn bean_row_rejects_bad_roast_level() {
        let row = BeanRow {
            roaster: "Onyx".into(),
            bean: "Geometry".into(),
            grind: "9".into(),
            roast_level: Some(7),
        };
        let err = NewBean::try_from(row).unwrap_err();
        assert!(matches!(err, RecordError::Invalid { field: "roast_level", .. }));
    }

    #[test]
    fn bean_row_maps_fields() {
        let row = BeanRow {
            roaster: "Square Mile".into(),
            bean: "Red Brick".into(),
            grind: "12".into(),
            roast_level: Some(3),
        };
        let bean = NewBean::try_from(row).unwrap();
        assert_eq!(bean.roaster_name, "Square Mile");
        assert_eq!(bean.roast_level, Some(RoastLevel::MEDIUM));
        assert_eq!(bean.grind_setting, "12");
    }
}
