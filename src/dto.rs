use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Source;

/// Data transfer object for creating a new topic
///
/// This struct is used to deserialize JSON requests for creating topics.
#[derive(Deserialize, Debug)]
pub struct CreateTopicDto {
    /// The name of the subject the topic belongs to
    pub subject: String,

    /// The title of the topic
    pub title: String,

    /// Free-text tag labels
    #[serde(default)]
    pub tags: Vec<String>,

    /// Where the study material came from
    pub source: Source,
}

/// Data transfer object for completing a review
///
/// This struct is used to deserialize JSON requests for recording reviews.
#[derive(Deserialize, Debug)]
pub struct CreateReviewDto {
    /// The ID of the topic being reviewed
    pub topic_id: String,

    /// 0-based index of the review being completed; must equal the number
    /// of reviews already recorded for the topic
    pub review_index: i32,
}

/// Data transfer object for creating or recoloring a subject
#[derive(Deserialize, Debug)]
pub struct UpsertSubjectDto {
    /// The subject name
    pub subject: String,

    /// The display color; a palette color is chosen when omitted
    #[serde(default)]
    pub color: Option<String>,
}

/// Data transfer object for renaming a subject
#[derive(Deserialize, Debug)]
pub struct RenameSubjectDto {
    /// The new subject name
    pub new_subject: String,

    /// The new display color; the current color is kept when omitted
    #[serde(default)]
    pub new_color: Option<String>,
}

/// Query parameters for the calendar views
///
/// The reference date defaults to today (UTC) when omitted.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct CalendarQueryDto {
    /// The reference date anchoring the window, as YYYY-MM-DD
    pub reference: Option<NaiveDate>,
}
