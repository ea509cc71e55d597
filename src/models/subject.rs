use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a named grouping of topics sharing one display color
///
/// The subject name is the natural key and is unique case-insensitively;
/// "maths" and "Maths" are the same subject. Topics carry a denormalized
/// copy of the name and color, so renames cascade through the repository
/// layer.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::subjects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Subject {
    /// Unique identifier for the subject (UUID v4 as string)
    id: String,

    /// The subject name, unique regardless of case
    name: String,

    /// The display color shared by all topics of this subject
    color: String,

    /// When this subject was created
    created_at: NaiveDateTime,

    /// When this subject was last updated
    updated_at: NaiveDateTime,
}

impl Subject {
    /// Creates a new subject with the given name and color
    pub fn new(name: String, color: String) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            color,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a subject with all fields specified
    ///
    /// Primarily used for testing and database deserialization.
    pub fn new_with_fields(id: String, name: String, color: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            color,
            created_at: created_at.naive_utc(),
            updated_at: created_at.naive_utc(),
        }
    }

    /// Gets the subject's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the subject's name
    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    /// Renames the subject
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now().naive_utc();
    }

    /// Gets the subject's display color
    pub fn get_color(&self) -> String {
        self.color.clone()
    }

    /// Sets the subject's display color
    pub fn set_color(&mut self, color: String) {
        self.color = color;
        self.updated_at = Utc::now().naive_utc();
    }

    /// Gets the subject's creation timestamp as a DateTime<Utc>
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }
}
