#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and bean-import parsing for the barista assistant.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The bean import CSV loader enforces headers and reports bad rows by line.
use std::path::{Path, PathBuf};

use eyre::WrapErr;
use serde::Deserialize;

/// Bean import CSV schema.
///
/// Expected headers:
/// roaster,bean,grind,roast_level
///
/// Example:
/// roaster,bean,grind,roast_level
/// Square Mile,Red Brick,12,3
/// Onyx,Geometry,9,
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BeanRow {
    pub roaster: String,
    pub bean: String,
    #[serde(default)]
    pub grind: String,
    /// Empty cell means "unknown roast".
    pub roast_level: Option<u8>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoastScaleCfg {
    #[default]
    FiveLevel,
    ThreeCategory,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DrinkCfg {
    Ristretto,
    #[default]
    Espresso,
    Lungo,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BrewCfg {
    /// Dose (g) used to pre-populate a measurement.
    pub default_dose_g: f64,
    /// Yield / dose used to pre-populate the expected yield.
    pub target_ratio: f64,
    /// Which roast table the classifier uses when no descriptor is given.
    pub roast_scale: RoastScaleCfg,
    /// Roast level assumed when a bean has none (1 = lightest, 5 = darkest).
    pub default_roast_level: u8,
}

impl Default for BrewCfg {
    fn default() -> Self {
        Self {
            default_dose_g: 18.0,
            target_ratio: 2.0,
            roast_scale: RoastScaleCfg::FiveLevel,
            default_roast_level: 3,
        }
    }
}

/// User-defined extraction window. When present it replaces the roast table.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct WindowCfg {
    pub min_s: f64,
    pub max_s: f64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SmartCfg {
    pub default_drink: DrinkCfg,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageCfg {
    /// Directory for the on-device JSON documents. Defaults to `./barista-data`.
    pub data_dir: Option<PathBuf>,
    /// Dial-in records kept, newest first.
    pub history_cap: usize,
}

impl Default for StorageCfg {
    fn default() -> Self {
        Self {
            data_dir: None,
            history_cap: 50,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MaintenanceCfg {
    /// Warn when the water filter is older than this many days.
    pub filter_overdue_days: i64,
}

impl Default for MaintenanceCfg {
    fn default() -> Self {
        Self {
            filter_overdue_days: 90,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub brew: BrewCfg,
    /// Optional fixed window overriding the roast table
    pub window: Option<WindowCfg>,
    pub smart: SmartCfg,
    pub storage: StorageCfg,
    pub maintenance: MaintenanceCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

const BEAN_CSV_HEADERS: [&str; 4] = ["roaster", "bean", "grind", "roast_level"];

/// Read the bean import CSV. Errors name the offending line (header is line 1).
pub fn load_beans_csv(path: &Path) -> eyre::Result<Vec<BeanRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .wrap_err_with(|| format!("open bean CSV {}", path.display()))?;

    let headers = rdr
        .headers()
        .wrap_err_with(|| format!("read bean CSV headers {}", path.display()))?;
    if !headers.iter().eq(BEAN_CSV_HEADERS) {
        let got: Vec<&str> = headers.iter().collect();
        eyre::bail!(
            "bean CSV must have headers '{}', got: {}",
            BEAN_CSV_HEADERS.join(","),
            got.join(",")
        );
    }

    let rows = rdr
        .deserialize::<BeanRow>()
        .enumerate()
        .map(|(i, rec)| rec.map_err(|e| eyre::eyre!("invalid CSV row {}: {e}", i + 2)))
        .collect::<eyre::Result<Vec<_>>>()?;
    if rows.is_empty() {
        eyre::bail!("bean CSV {} has no rows", path.display());
    }
    Ok(rows)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Brew
        if !(self.brew.default_dose_g.is_finite() && self.brew.default_dose_g > 0.0) {
            eyre::bail!("brew.default_dose_g must be > 0");
        }
        if !(self.brew.target_ratio.is_finite() && self.brew.target_ratio > 0.0) {
            eyre::bail!("brew.target_ratio must be > 0");
        }
        if !(1..=5).contains(&self.brew.default_roast_level) {
            eyre::bail!("brew.default_roast_level must be in [1, 5]");
        }

        // Window
        if let Some(w) = self.window {
            if !(w.min_s.is_finite() && w.min_s > 0.0) {
                eyre::bail!("window.min_s must be > 0");
            }
            if !(w.max_s.is_finite() && w.max_s > 0.0) {
                eyre::bail!("window.max_s must be > 0");
            }
            if w.min_s > w.max_s {
                eyre::bail!("window.min_s must be <= window.max_s");
            }
        }

        // Storage
        if self.storage.history_cap == 0 {
            eyre::bail!("storage.history_cap must be >= 1");
        }
        if self.storage.history_cap > 10_000 {
            eyre::bail!("storage.history_cap is unreasonably large (>10000)");
        }

        // Maintenance
        if self.maintenance.filter_overdue_days < 1 {
            eyre::bail!("maintenance.filter_overdue_days must be >= 1");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}
