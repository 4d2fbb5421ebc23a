//! Time windows over dated records

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDateTime, NaiveTime, Offset, TimeZone,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::traits::Dated;
use crate::types::*;

/// Reporting period selectable in the day book and expense reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeWindow {
    #[default]
    All,
    Today,
    ThisMonth,
}

impl TimeWindow {
    /// Earliest timestamp included by the window, `None` for no lower bound
    pub fn lower_bound<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<Timestamp> {
        match self {
            TimeWindow::All => None,
            TimeWindow::Today => Some(start_of_day(now)),
            TimeWindow::ThisMonth => Some(start_of_month(now)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::All => "All Time",
            TimeWindow::Today => "Today",
            TimeWindow::ThisMonth => "This Month",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = KhataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TimeWindow::All),
            "today" => Ok(TimeWindow::Today),
            "month" | "thismonth" | "this_month" => Ok(TimeWindow::ThisMonth),
            other => Err(KhataError::Validation(format!(
                "Unknown time window '{}'",
                other
            ))),
        }
    }
}

/// Epoch millis of a wall-clock time in `tz`
///
/// An ambiguous time (clocks turned back) resolves to the earlier instant. A
/// skipped time (clocks turned forward) resolves to the first instant after
/// the gap, by reading it with the offset in force before the gap.
fn local_to_millis<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Timestamp {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        LocalResult::None => {
            let offset = tz.offset_from_utc_datetime(&(local - Duration::days(1))).fix();
            local.and_utc().timestamp_millis() - i64::from(offset.local_minus_utc()) * 1000
        }
    }
}

/// Start of the local calendar day containing `now`
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> Timestamp {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    local_to_millis(&now.timezone(), midnight)
}

/// Day 1, 00:00 of the local calendar month containing `now`
pub fn start_of_month<Tz: TimeZone>(now: &DateTime<Tz>) -> Timestamp {
    let today = now.date_naive();
    let first = today.with_day(1).unwrap_or(today);
    local_to_millis(&now.timezone(), first.and_time(NaiveTime::MIN))
}

/// Records whose date falls inside the window, in input order
pub fn filter_by_time_window<'a, T, Tz>(
    records: &'a [T],
    window: TimeWindow,
    now: &DateTime<Tz>,
) -> Vec<&'a T>
where
    T: Dated,
    Tz: TimeZone,
{
    match window.lower_bound(now) {
        None => records.iter().collect(),
        Some(start) => records.iter().filter(|r| r.date() >= start).collect(),
    }
}

/// Stable sort, newest first; records with equal dates keep their input order
pub fn sort_by_date_descending<T: Dated>(records: &mut [T]) {
    records.sort_by(|a, b| b.date().cmp(&a.date()));
}
