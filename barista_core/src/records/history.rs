use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dial_in::{BrewMeasurement, DialInResult};
use crate::expectation::Feedback;

/// Number of dial-in records kept on device.
pub const DEFAULT_HISTORY_CAP: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialInRecord {
    pub id: Uuid,
    pub dose: f64,
    #[serde(rename = "yield")]
    pub yield_g: f64,
    pub time: f64,
    pub ratio: f64,
    pub feedback: Feedback,
    pub created_at: DateTime<Utc>,
}

impl DialInRecord {
    pub fn from_result(
        id: Uuid,
        m: &BrewMeasurement,
        result: &DialInResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            dose: m.dose_g,
            yield_g: m.yield_g,
            time: m.time_s,
            ratio: result.ratio,
            feedback: result.feedback,
            created_at,
        }
    }
}

/// Newest-first log truncated to a fixed capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    cap: usize,
    records: Vec<DialInRecord>,
}

impl HistoryLog {
    /// Wrap existing records (assumed newest first), dropping any beyond `cap`.
    pub fn from_records(mut records: Vec<DialInRecord>, cap: usize) -> Self {
        records.truncate(cap);
        Self { cap, records }
    }

    pub fn push(&mut self, record: DialInRecord) {
        self.records.insert(0, record);
        self.records.truncate(self.cap);
    }

    pub fn records(&self) -> &[DialInRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DialInRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(i: usize) -> DialInRecord {
        DialInRecord {
            id: Uuid::new_v4(),
            dose: 18.0,
            yield_g: 36.0,
            time: i as f64,
            ratio: 2.0,
            feedback: Feedback::Perfect,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn push_keeps_newest_first_and_caps() {
        let mut log = HistoryLog::from_records(Vec::new(), 3);
        for i in 0..5 {
            log.push(record(i));
        }
        let times: Vec<f64> = log.records().iter().map(|r| r.time).collect();
        assert_eq!(times, vec![4.0, 3.0, 2.0]);
    }

    #[test]
    fn from_records_truncates_oversized_input() {
        let log = HistoryLog::from_records((0..60).map(record).collect(), DEFAULT_HISTORY_CAP);
        assert_eq!(log.records().len(), DEFAULT_HISTORY_CAP);
    }

    #[test]
    fn yield_serializes_under_its_plain_name() {
        let json = serde_json::to_value(record(1)).unwrap();
        assert_eq!(json["yield"], 36.0);
        assert_eq!(json["feedback"], "perfect");
    }
}
