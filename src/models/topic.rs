use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DateList, Source, TagList};
use crate::scheduler;

/// Represents a unit of study material with its own review schedule
///
/// This struct maps directly to the `topics` table in the database.
/// The 7-entry review schedule is computed once at creation from the fixed
/// interval table and is never rescheduled, even when reviews are completed
/// late. The subject name and color are denormalized copies of the owning
/// subject; subject renames cascade onto them.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::topics)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Topic {
    /// Unique identifier for the topic (UUID v4 as string)
    id: String,

    /// The name of the subject this topic belongs to
    subject: String,

    /// The title of the topic
    title: String,

    /// Free-text tag labels, stored as JSON text
    tags: TagList,

    /// Where the study material came from
    source: Source,

    /// Display color, copied from the owning subject
    color: String,

    /// The 7 scheduled review timestamps, stored as JSON text
    scheduled_reviews: DateList,

    /// Whether all scheduled reviews have been completed
    completed: bool,

    /// When this topic was created
    created_at: NaiveDateTime,

    /// When this topic was last updated
    updated_at: NaiveDateTime,
}

impl Topic {
    /// Creates a new topic with its review schedule computed from now
    ///
    /// Generates a UUID v4 for the ID and derives the scheduled reviews
    /// from the creation timestamp via [`scheduler::calculate_schedule`].
    ///
    /// ### Arguments
    ///
    /// * `subject` - The name of the subject this topic belongs to
    /// * `title` - The title of the topic
    /// * `tags` - Free-text tag labels
    /// * `source` - Where the study material came from
    /// * `color` - The display color inherited from the subject
    pub fn new(subject: String, title: String, tags: Vec<String>, source: Source, color: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            subject,
            title,
            tags: TagList(tags),
            source,
            color,
            scheduled_reviews: DateList(scheduler::calculate_schedule(now)),
            completed: false,
            created_at: now.naive_utc(),
            updated_at: now.naive_utc(),
        }
    }

    /// Creates a topic with all fields specified
    ///
    /// Primarily used for testing, where a fixed creation time (and hence a
    /// fixed schedule) is needed.
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_fields(
        id: String,
        subject: String,
        title: String,
        tags: Vec<String>,
        source: Source,
        color: String,
        scheduled_reviews: Vec<DateTime<Utc>>,
        completed: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            subject,
            title,
            tags: TagList(tags),
            source,
            color,
            scheduled_reviews: DateList(scheduled_reviews),
            completed,
            created_at: created_at.naive_utc(),
            updated_at: created_at.naive_utc(),
        }
    }

    /// Gets the topic's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the name of the subject this topic belongs to
    pub fn get_subject(&self) -> String {
        self.subject.clone()
    }

    /// Moves the topic to a (renamed) subject, updating the denormalized
    /// name and color together
    pub fn set_subject(&mut self, subject: String, color: String) {
        self.subject = subject;
        self.color = color;
        self.updated_at = Utc::now().naive_utc();
    }

    /// Gets the topic's title
    pub fn get_title(&self) -> String {
        self.title.clone()
    }

    /// Gets the topic's tag labels
    pub fn get_tags(&self) -> Vec<String> {
        self.tags.0.clone()
    }

    /// Gets the topic's source
    pub fn get_source(&self) -> Source {
        self.source
    }

    /// Gets the topic's display color
    pub fn get_color(&self) -> String {
        self.color.clone()
    }

    /// Gets the scheduled review timestamps, in order
    pub fn get_scheduled_reviews(&self) -> Vec<DateTime<Utc>> {
        self.scheduled_reviews.0.clone()
    }

    /// Whether all scheduled reviews have been completed
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Marks the topic as completed
    pub fn set_completed(&mut self) {
        self.completed = true;
        self.updated_at = Utc::now().naive_utc();
    }

    /// Gets the topic's creation timestamp as a DateTime<Utc>
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }

    /// Gets the topic's updated timestamp as a DateTime<Utc>
    pub fn get_updated_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.updated_at, Utc)
    }
}
