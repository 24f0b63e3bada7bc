use chrono::{DateTime, NaiveDate, Utc};

/// Wall-clock source for record timestamps and maintenance dates.
pub trait Calendar {
    fn now_utc(&self) -> DateTime<Utc>;

    /// Calendar date (UTC) of `now_utc()`.
    fn today(&self) -> NaiveDate {
        self.now_utc().date_naive()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCalendar;

impl Calendar for SystemCalendar {
    #[inline]
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Calendar pinned to a single instant.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, Copy)]
pub struct FixedCalendar(pub DateTime<Utc>);

#[cfg(any(test, feature = "test-util"))]
impl FixedCalendar {
    /// Midnight UTC of the given date. Invalid dates fall back to the Unix epoch.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let at = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or_default();
        Self(at)
    }
}

#[cfg(any(test, feature = "test-util"))]
impl Calendar for FixedCalendar {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_calendar_reports_its_date() {
        let cal = FixedCalendar::on(2026, 2, 20);
        assert_eq!(cal.today(), NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
    }
}
