use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Days after which the water filter is due for replacement.
pub const DEFAULT_FILTER_OVERDUE_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaintenanceTask {
    GroupHeadCleaning,
    Backflush,
    Descaling,
    WaterFilter,
}

impl MaintenanceTask {
    pub const ALL: [MaintenanceTask; 4] = [
        MaintenanceTask::GroupHeadCleaning,
        MaintenanceTask::Backflush,
        MaintenanceTask::Descaling,
        MaintenanceTask::WaterFilter,
    ];

    /// Stable short name used on the command line and in JSON.
    pub fn key(self) -> &'static str {
        match self {
            MaintenanceTask::GroupHeadCleaning => "group-head",
            MaintenanceTask::Backflush => "backflush",
            MaintenanceTask::Descaling => "descaling",
            MaintenanceTask::WaterFilter => "water-filter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaintenanceTask::GroupHeadCleaning => "Group head cleaning",
            MaintenanceTask::Backflush => "Backflush",
            MaintenanceTask::Descaling => "Descaling",
            MaintenanceTask::WaterFilter => "Water filter change",
        }
    }
}

impl core::str::FromStr for MaintenanceTask {
    type Err = RecordError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        MaintenanceTask::ALL
            .into_iter()
            .find(|t| t.key() == wanted)
            .ok_or(RecordError::UnknownTask(wanted))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceDates {
    pub last_group_head_cleaning: Option<NaiveDate>,
    pub last_backflush: Option<NaiveDate>,
    pub last_descaling: Option<NaiveDate>,
    pub water_filter_last_changed: Option<NaiveDate>,
}

impl MaintenanceDates {
    pub fn get(&self, task: MaintenanceTask) -> Option<NaiveDate> {
        match task {
            MaintenanceTask::GroupHeadCleaning => self.last_group_head_cleaning,
            MaintenanceTask::Backflush => self.last_backflush,
            MaintenanceTask::Descaling => self.last_descaling,
            MaintenanceTask::WaterFilter => self.water_filter_last_changed,
        }
    }

    pub fn set(&mut self, task: MaintenanceTask, date: Option<NaiveDate>) {
        let slot = match task {
            MaintenanceTask::GroupHeadCleaning => &mut self.last_group_head_cleaning,
            MaintenanceTask::Backflush => &mut self.last_backflush,
            MaintenanceTask::Descaling => &mut self.last_descaling,
            MaintenanceTask::WaterFilter => &mut self.water_filter_last_changed,
        };
        *slot = date;
    }

    pub fn mark_done(&mut self, task: MaintenanceTask, today: NaiveDate) {
        self.set(task, Some(today));
    }

    /// Nothing has been logged yet.
    pub fn is_empty(&self) -> bool {
        MaintenanceTask::ALL.iter().all(|t| self.get(*t).is_none())
    }

    pub fn days_since(&self, task: MaintenanceTask, today: NaiveDate) -> Option<i64> {
        self.get(task).map(|d| (today - d).num_days())
    }

    /// True when the filter was changed strictly more than `overdue_days` ago.
    pub fn is_filter_overdue(&self, today: NaiveDate, overdue_days: i64) -> bool {
        self.days_since(MaintenanceTask::WaterFilter, today)
            .is_some_and(|d| d > overdue_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn filter_overdue_is_strictly_after_threshold() {
        let mut dates = MaintenanceDates::default();
        let today = date(2026, 4, 1);
        assert!(!dates.is_filter_overdue(today, DEFAULT_FILTER_OVERDUE_DAYS));

        dates.set(MaintenanceTask::WaterFilter, Some(today - chrono::Days::new(90)));
        assert!(!dates.is_filter_overdue(today, DEFAULT_FILTER_OVERDUE_DAYS));

        dates.set(MaintenanceTask::WaterFilter, Some(today - chrono::Days::new(91)));
        assert!(dates.is_filter_overdue(today, DEFAULT_FILTER_OVERDUE_DAYS));
    }

    #[test]
    fn mark_done_sets_only_that_task() {
        let mut dates = MaintenanceDates::default();
        assert!(dates.is_empty());
        dates.mark_done(MaintenanceTask::Backflush, date(2026, 2, 20));
        assert!(!dates.is_empty());
        assert_eq!(dates.last_backflush, Some(date(2026, 2, 20)));
        assert_eq!(dates.last_descaling, None);
    }

    #[test]
    fn task_keys_round_trip_through_parse() {
        for t in MaintenanceTask::ALL {
            assert_eq!(t.key().parse::<MaintenanceTask>().unwrap(), t);
        }
        assert!("oil-change".parse::<MaintenanceTask>().is_err());
    }

    #[test]
    fn partial_documents_deserialize() {
        let dates: MaintenanceDates =
            serde_json::from_str(r#"{"last_backflush":"2026-02-20"}"#).unwrap();
        assert_eq!(dates.last_backflush, Some(date(2026, 2, 20)));
        assert_eq!(dates.water_filter_last_changed, None);
    }
}
