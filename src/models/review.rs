use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scheduler::REVIEW_COUNT;

/// Represents one completed study-recall event for a topic
///
/// Reviews are append-only and numbered 1-7; the `k`th recorded review for
/// a topic always carries number `k`. A review record only exists once the
/// review has been completed, so `completed` is always true when created.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Review {
    /// Unique identifier for the review (UUID v4 as string)
    id: String,

    /// The ID of the topic this review belongs to
    topic_id: String,

    /// 1-based position within the topic's 7-step schedule
    review_number: i32,

    /// Whether the review was completed (always true once recorded)
    completed: bool,

    /// When this review was completed
    review_timestamp: NaiveDateTime,
}

impl Review {
    /// Creates a new completed review for a topic
    ///
    /// ### Arguments
    ///
    /// * `topic_id` - The ID of the topic being reviewed
    /// * `review_number` - 1-based position within the schedule
    ///
    /// ### Panics
    ///
    /// Panics if the review number is not in the range 1-7. Callers that
    /// handle untrusted input must validate first (the repository layer
    /// does).
    pub fn new(topic_id: &str, review_number: i32) -> Self {
        if review_number < 1 || review_number > REVIEW_COUNT as i32 {
            panic!("Review number must be between 1 and {}, got {}", REVIEW_COUNT, review_number);
        }

        Self {
            id: Uuid::new_v4().to_string(),
            topic_id: topic_id.to_string(),
            review_number,
            completed: true,
            review_timestamp: Utc::now().naive_utc(),
        }
    }

    /// Creates a review with all fields specified
    ///
    /// Primarily used for testing and database deserialization.
    pub fn new_with_fields(
        id: String,
        topic_id: String,
        review_number: i32,
        completed: bool,
        review_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            topic_id,
            review_number,
            completed,
            review_timestamp: review_timestamp.naive_utc(),
        }
    }

    /// Gets the review's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the ID of the topic this review belongs to
    pub fn get_topic_id(&self) -> String {
        self.topic_id.clone()
    }

    /// Gets the review's 1-based number within the schedule
    pub fn get_review_number(&self) -> i32 {
        self.review_number
    }

    /// Whether the review was completed
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Gets the completion timestamp as a DateTime<Utc>
    pub fn get_review_timestamp(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.review_timestamp, Utc)
    }
}
