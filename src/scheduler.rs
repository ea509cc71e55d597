use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::Topic;

/// Spaced repetition scheduling
///
/// The entire scheduling policy is the fixed interval table below: a topic
/// created at time T is reviewed at T + 1, 3, 7, 14, 30, 60 and 120 days.
/// There is no adaptive logic and a schedule is never recomputed, even when
/// reviews are completed late. The table is load-bearing compatibility
/// state: stored historical schedules were computed from it, so any
/// reimplementation must use exactly these values.
pub const REVIEW_INTERVALS: [i64; 7] = [1, 3, 7, 14, 30, 60, 120];

/// Number of scheduled reviews per topic
pub const REVIEW_COUNT: usize = REVIEW_INTERVALS.len();

/// Computes the fixed review schedule for a topic created at `created_at`
///
/// Returns one timestamp per interval, in order. Only the date component
/// advances; the time of day is preserved from the creation timestamp.
/// Deterministic: the same input always yields the same schedule.
pub fn calculate_schedule(created_at: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    REVIEW_INTERVALS
        .iter()
        .map(|days| created_at + Duration::days(*days))
        .collect()
}

/// Resolves the 0-based index of the first not-yet-completed review
///
/// Returns `None` for completed topics, and defensively for topics whose
/// review count has already reached the schedule length without the
/// completed flag being set.
pub fn next_review_index(topic: &Topic, completed_reviews: usize) -> Option<usize> {
    if topic.is_completed() {
        return None;
    }
    if completed_reviews >= topic.get_scheduled_reviews().len() {
        return None;
    }
    Some(completed_reviews)
}

/// Gets the date (time truncated) of the topic's next scheduled review
pub fn next_due_date(topic: &Topic, completed_reviews: usize) -> Option<NaiveDate> {
    next_review_index(topic, completed_reviews)
        .map(|index| topic.get_scheduled_reviews()[index].date_naive())
}

/// Whether the topic's next review is due on or before `today`
///
/// Comparison is date-only: a review scheduled for 23:59 tonight is due all
/// day. Future reviews are not due; completed topics are never due.
pub fn is_due(topic: &Topic, completed_reviews: usize, today: NaiveDate) -> bool {
    next_due_date(topic, completed_reviews).is_some_and(|due| due <= today)
}

/// Whether the topic's next review is strictly past its scheduled date
///
/// A review due exactly today is due but not overdue.
pub fn is_overdue(topic: &Topic, completed_reviews: usize, today: NaiveDate) -> bool {
    next_due_date(topic, completed_reviews).is_some_and(|due| due < today)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn fixed_topic(completed: bool) -> Topic {
        let created_at = "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        Topic::new_with_fields(
            "topic-1".to_string(),
            "Mathematics".to_string(),
            "Integration by parts".to_string(),
            vec![],
            Source::Class,
            "#ef4444".to_string(),
            calculate_schedule(created_at),
            completed,
            created_at,
        )
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_calculate_schedule_matches_interval_table() {
        let created_at = "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let schedule = calculate_schedule(created_at);

        let expected = [
            "2024-01-02", "2024-01-04", "2024-01-08", "2024-01-15",
            "2024-01-31", "2024-03-01", "2024-04-30",
        ];
        assert_eq!(schedule.len(), 7);
        for (scheduled, expected) in schedule.iter().zip(expected) {
            assert_eq!(scheduled.date_naive(), date(expected));
            assert_eq!(scheduled.time(), created_at.time());
        }
    }

    #[test]
    fn test_calculate_schedule_preserves_time_of_day() {
        let created_at = "2024-06-15T21:47:03Z".parse::<DateTime<Utc>>().unwrap();
        let schedule = calculate_schedule(created_at);

        for scheduled in &schedule {
            assert_eq!(scheduled.time(), created_at.time());
        }
    }

    #[test]
    fn test_next_review_index_tracks_completed_count() {
        let topic = fixed_topic(false);

        assert_eq!(next_review_index(&topic, 0), Some(0));
        assert_eq!(next_review_index(&topic, 4), Some(4));
        assert_eq!(next_review_index(&topic, 6), Some(6));
        // Defensive: all reviews recorded but flag not yet set
        assert_eq!(next_review_index(&topic, 7), None);
    }

    #[test]
    fn test_completed_topic_is_never_due() {
        let topic = fixed_topic(true);

        assert_eq!(next_review_index(&topic, 7), None);
        assert!(!is_due(&topic, 7, date("2099-01-01")));
        assert!(!is_overdue(&topic, 7, date("2099-01-01")));
    }

    #[test]
    fn test_due_on_scheduled_date_but_not_overdue() {
        let topic = fixed_topic(false);

        // First review scheduled for 2024-01-02
        assert!(is_due(&topic, 0, date("2024-01-02")));
        assert!(!is_overdue(&topic, 0, date("2024-01-02")));
    }

    #[test]
    fn test_due_and_overdue_after_scheduled_date() {
        let topic = fixed_topic(false);

        assert!(is_due(&topic, 0, date("2024-01-03")));
        assert!(is_overdue(&topic, 0, date("2024-01-03")));
    }

    #[test]
    fn test_not_due_before_scheduled_date() {
        let topic = fixed_topic(false);

        assert!(!is_due(&topic, 0, date("2024-01-01")));
        assert!(!is_overdue(&topic, 0, date("2024-01-01")));

        // Second review (2024-01-04) is not due the day after the first
        assert!(!is_due(&topic, 1, date("2024-01-03")));
    }
}
