use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::Topic;
use crate::scheduler;

/// Calendar date bucketing for the week and month views
///
/// Both views are fixed-size windows anchored to the Monday of the week
/// containing a reference date: 7 days for the week view, 28 days (4 whole
/// weeks, not a calendar month) for the month view. Every non-completed
/// topic lands in at most one day cell.

/// Number of days in the month view window
const MONTH_WINDOW_DAYS: i64 = 28;

/// One rendered day cell: its date, a human label and the topics due on it
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    /// The calendar date of this cell
    pub date: NaiveDate,
    /// "Today"/"Tomorrow"/"Yesterday" near the reference date, otherwise a
    /// short day-month rendering
    pub label: String,
    /// Topics whose next review buckets onto this date
    pub topics: Vec<Topic>,
}

/// Returns the Monday of the week containing `reference`
///
/// ISO-style week start: Sunday belongs to the week of the previous Monday.
fn week_start(reference: NaiveDate) -> NaiveDate {
    reference - Duration::days(reference.weekday().num_days_from_monday() as i64)
}

/// The 7 dates of the week containing `reference`, Monday through Sunday
pub fn week_dates(reference: NaiveDate) -> Vec<NaiveDate> {
    let monday = week_start(reference);
    (0..7).map(|offset| monday + Duration::days(offset)).collect()
}

/// 28 consecutive dates starting from the Monday of the reference week
///
/// This is a scrolling 4-week window anchored to the reference date, not a
/// calendar month.
pub fn month_dates(reference: NaiveDate) -> Vec<NaiveDate> {
    let monday = week_start(reference);
    (0..MONTH_WINDOW_DAYS).map(|offset| monday + Duration::days(offset)).collect()
}

/// Chunks a date sequence into consecutive weeks of 7 for row rendering
pub fn group_by_week(dates: &[NaiveDate]) -> Vec<Vec<NaiveDate>> {
    dates.chunks(7).map(|week| week.to_vec()).collect()
}

/// Formats a date relative to the reference date
///
/// Dates matching the reference date or its immediate neighbors get the
/// words "Today", "Tomorrow" or "Yesterday"; anything else renders as a
/// short day-month string like "8 Jan".
pub fn relative_label(date: NaiveDate, reference: NaiveDate) -> String {
    if date == reference {
        "Today".to_string()
    } else if date == reference + Duration::days(1) {
        "Tomorrow".to_string()
    } else if date == reference - Duration::days(1) {
        "Yesterday".to_string()
    } else {
        date.format("%-d %b").to_string()
    }
}

/// Resolves the single day cell a topic occupies, if any
///
/// Completed topics occupy no cell. A topic whose next review is scheduled
/// on or after the reference date buckets on that scheduled date. An
/// overdue topic collapses onto the reference date itself; it never shows
/// on its stale scheduled date and never occupies more than one cell.
pub fn bucket_date(topic: &Topic, completed_reviews: usize, reference: NaiveDate) -> Option<NaiveDate> {
    let due = scheduler::next_due_date(topic, completed_reviews)?;
    if due < reference {
        Some(reference)
    } else {
        Some(due)
    }
}

/// Builds the day cells for a window of dates
///
/// `topics` pairs each topic with its completed-review count. Each topic
/// appears in the cell matching its bucket date, or nowhere when the bucket
/// falls outside the window.
pub fn build_days(topics: &[(Topic, usize)], window: &[NaiveDate], reference: NaiveDate) -> Vec<CalendarDay> {
    window
        .iter()
        .map(|date| CalendarDay {
            date: *date,
            label: relative_label(*date, reference),
            topics: topics
                .iter()
                .filter(|(topic, completed)| bucket_date(topic, *completed, reference) == Some(*date))
                .map(|(topic, _)| topic.clone())
                .collect(),
        })
        .collect()
}

/// Builds the 7 day cells of the week view
pub fn build_week(topics: &[(Topic, usize)], reference: NaiveDate) -> Vec<CalendarDay> {
    build_days(topics, &week_dates(reference), reference)
}

/// Builds the month view: 4 rows of 7 day cells
pub fn build_month(topics: &[(Topic, usize)], reference: NaiveDate) -> Vec<Vec<CalendarDay>> {
    let days = build_days(topics, &month_dates(reference), reference);
    days.chunks(7).map(|week| week.to_vec()).collect()
}
