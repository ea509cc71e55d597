use crate::db::DbPool;
use crate::models::{Source, Subject, Topic};
use crate::palette;
use crate::schema::{reviews, subjects, topics};
use anyhow::{anyhow, Result};
use diesel::prelude::*;

/// Creates a new topic with its review schedule computed at creation time
///
/// The subject is matched case-insensitively against existing subjects: a
/// known subject contributes its canonical name and color to the topic, an
/// unknown one is inserted with the first unused palette color. The subject
/// insert and the topic insert share a transaction.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `subject_name` - The name of the subject the topic belongs to
/// * `title` - The title of the topic
/// * `tags` - Free-text tag labels
/// * `source` - Where the study material came from
///
/// ### Returns
///
/// A Result containing the newly created Topic if successful
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database operations fail
pub fn create_topic(
    pool: &DbPool,
    subject_name: &str,
    title: String,
    tags: Vec<String>,
    source: Source,
) -> Result<Topic> {
    let conn = &mut pool.get()?;

    conn.transaction(|conn| {
        let existing = subjects::table.load::<Subject>(conn)?;
        let color = palette::subject_color(subject_name, &existing);

        // Reuse the canonical spelling of a known subject so rename
        // cascades match every topic of that subject
        let lowered = subject_name.to_lowercase();
        let canonical = match existing.iter().find(|s| s.get_name().to_lowercase() == lowered) {
            Some(subject) => subject.get_name(),
            None => {
                let subject = Subject::new(subject_name.to_string(), color.clone());
                diesel::insert_into(subjects::table)
                    .values(&subject)
                    .execute(conn)?;
                subject.get_name()
            }
        };

        let topic = Topic::new(canonical, title, tags, source, color);
        diesel::insert_into(topics::table)
            .values(&topic)
            .execute(conn)?;

        Ok(topic)
    })
}

/// Gets a topic by its ID
///
/// ### Returns
///
/// A Result containing the Topic if found, or None if no topic has the ID
pub fn get_topic(pool: &DbPool, topic_id: &str) -> Result<Option<Topic>> {
    let conn = &mut pool.get()?;

    let topic = topics::table
        .find(topic_id)
        .first::<Topic>(conn)
        .optional()?;

    Ok(topic)
}

/// Lists all topics, oldest first
pub fn list_topics(pool: &DbPool) -> Result<Vec<Topic>> {
    let conn = &mut pool.get()?;

    let all_topics = topics::table
        .order_by(topics::created_at.asc())
        .load::<Topic>(conn)?;

    Ok(all_topics)
}

/// Lists all topics belonging to a subject
pub fn list_topics_by_subject(pool: &DbPool, subject_name: &str) -> Result<Vec<Topic>> {
    let conn = &mut pool.get()?;

    let subject_topics = topics::table
        .filter(topics::subject.eq(subject_name))
        .order_by(topics::created_at.asc())
        .load::<Topic>(conn)?;

    Ok(subject_topics)
}

/// Deletes a topic and all its reviews
///
/// ### Errors
///
/// Returns an error if the topic does not exist or the deletes fail
pub fn delete_topic(pool: &DbPool, topic_id: &str) -> Result<()> {
    let conn = &mut pool.get()?;

    conn.transaction(|conn| {
        diesel::delete(reviews::table.filter(reviews::topic_id.eq(topic_id))).execute(conn)?;

        let deleted = diesel::delete(topics::table.find(topic_id)).execute(conn)?;
        if deleted == 0 {
            return Err(anyhow!("Topic not found"));
        }

        Ok(())
    })
}
