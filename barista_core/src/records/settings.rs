use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::BrewDefaults;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_dose: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_bean_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_bean_opened_date: Option<NaiveDate>,
}

/// Dose and yield used to pre-populate a measurement form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prefill {
    pub dose_g: f64,
    pub yield_g: f64,
}

impl GeneralSettings {
    /// Stored user preferences win over configured defaults.
    pub fn prefill(&self, defaults: &BrewDefaults) -> Prefill {
        let dose_g = self.default_dose.unwrap_or(defaults.dose_g);
        let ratio = self.target_ratio.unwrap_or(defaults.target_ratio);
        Prefill {
            dose_g,
            yield_g: dose_g * ratio,
        }
    }
}
