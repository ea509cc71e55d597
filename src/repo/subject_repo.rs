use crate::db::DbPool;
use crate::models::{Subject, Topic};
use crate::palette;
use crate::schema::{reviews, subjects, topics};
use anyhow::{anyhow, Result};
use chrono::Utc;
use diesel::prelude::*;

/// Finds a subject by name, matched case-insensitively
pub fn get_subject(pool: &DbPool, name: &str) -> Result<Option<Subject>> {
    let conn = &mut pool.get()?;

    let lowered = name.to_lowercase();
    let subject = subjects::table
        .load::<Subject>(conn)?
        .into_iter()
        .find(|s| s.get_name().to_lowercase() == lowered);

    Ok(subject)
}

/// Lists all subjects, oldest first
pub fn list_subjects(pool: &DbPool) -> Result<Vec<Subject>> {
    let conn = &mut pool.get()?;

    let all_subjects = subjects::table
        .order_by(subjects::created_at.asc())
        .load::<Subject>(conn)?;

    Ok(all_subjects)
}

/// Creates a subject, or updates the color of an existing one
///
/// The name is matched case-insensitively. When no color is supplied a new
/// subject gets the first unused palette color and an existing subject keeps
/// its current one.
pub fn upsert_subject(pool: &DbPool, name: &str, color: Option<String>) -> Result<Subject> {
    let conn = &mut pool.get()?;

    conn.transaction(|conn| {
        let existing = subjects::table.load::<Subject>(conn)?;
        let lowered = name.to_lowercase();

        if let Some(mut subject) = existing.iter().find(|s| s.get_name().to_lowercase() == lowered).cloned() {
            if let Some(color) = color {
                subject.set_color(color.clone());
                diesel::update(subjects::table.find(subject.get_id()))
                    .set((
                        subjects::color.eq(color.clone()),
                        subjects::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;

                // Topics carry a denormalized copy of the color
                diesel::update(topics::table.filter(topics::subject.eq(subject.get_name())))
                    .set((
                        topics::color.eq(color),
                        topics::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;
            }
            return Ok(subject);
        }

        let color = color.unwrap_or_else(|| palette::subject_color(name, &existing));
        let subject = Subject::new(name.to_string(), color);
        diesel::insert_into(subjects::table)
            .values(&subject)
            .execute(conn)?;

        Ok(subject)
    })
}

/// Renames a subject, cascading the new name and color to all its topics
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `old_name` - The current subject name (case-insensitive match)
/// * `new_name` - The new subject name
/// * `color` - The new color; the current color is kept when None
///
/// ### Errors
///
/// Returns an error if the subject does not exist, or the new name is
/// already taken by a different subject
pub fn rename_subject(pool: &DbPool, old_name: &str, new_name: &str, color: Option<String>) -> Result<Subject> {
    let conn = &mut pool.get()?;

    conn.transaction(|conn| {
        let existing = subjects::table.load::<Subject>(conn)?;
        let lowered_old = old_name.to_lowercase();
        let lowered_new = new_name.to_lowercase();

        let mut subject = existing
            .iter()
            .find(|s| s.get_name().to_lowercase() == lowered_old)
            .cloned()
            .ok_or_else(|| anyhow!("Subject not found"))?;

        // Renaming to a case variant of the same subject is fine; taking
        // another subject's name is not
        let collision = existing.iter().any(|s| {
            s.get_id() != subject.get_id() && s.get_name().to_lowercase() == lowered_new
        });
        if collision {
            return Err(anyhow!("Subject name already in use: {}", new_name));
        }

        let canonical_old = subject.get_name();
        let new_color = color.unwrap_or_else(|| subject.get_color());

        subject.set_name(new_name.to_string());
        subject.set_color(new_color.clone());

        diesel::update(subjects::table.find(subject.get_id()))
            .set((
                subjects::name.eq(new_name),
                subjects::color.eq(new_color.clone()),
                subjects::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;

        diesel::update(topics::table.filter(topics::subject.eq(canonical_old)))
            .set((
                topics::subject.eq(new_name),
                topics::color.eq(new_color),
                topics::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;

        Ok(subject)
    })
}

/// Deletes a subject together with all its topics and their reviews
///
/// ### Errors
///
/// Returns an error if the subject does not exist or the deletes fail
pub fn delete_subject(pool: &DbPool, name: &str) -> Result<()> {
    let conn = &mut pool.get()?;

    conn.transaction(|conn| {
        let existing = subjects::table.load::<Subject>(conn)?;
        let lowered = name.to_lowercase();

        let subject = existing
            .iter()
            .find(|s| s.get_name().to_lowercase() == lowered)
            .ok_or_else(|| anyhow!("Subject not found"))?;

        let topic_ids: Vec<String> = topics::table
            .filter(topics::subject.eq(subject.get_name()))
            .load::<Topic>(conn)?
            .iter()
            .map(Topic::get_id)
            .collect();

        diesel::delete(reviews::table.filter(reviews::topic_id.eq_any(&topic_ids))).execute(conn)?;
        diesel::delete(topics::table.filter(topics::id.eq_any(&topic_ids))).execute(conn)?;
        diesel::delete(subjects::table.find(subject.get_id())).execute(conn)?;

        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use crate::palette::SUBJECT_COLORS;
    use crate::repo::{create_topic, get_topic, list_topics, record_review};
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_upsert_creates_with_palette_color() {
        let pool = setup_test_db();

        let first = upsert_subject(&pool, "Mathematics", None).unwrap();
        let second = upsert_subject(&pool, "History", None).unwrap();

        assert_eq!(first.get_color(), SUBJECT_COLORS[0]);
        assert_eq!(second.get_color(), SUBJECT_COLORS[1]);
    }

    #[test]
    fn test_upsert_is_case_insensitive() {
        let pool = setup_test_db();

        let first = upsert_subject(&pool, "Mathematics", None).unwrap();
        let again = upsert_subject(&pool, "MATHEMATICS", None).unwrap();

        assert_eq!(first.get_id(), again.get_id());
        assert_eq!(list_subjects(&pool).unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_recolor_cascades_to_topics() {
        let pool = setup_test_db();

        let topic = create_topic(&pool, "Physics", "Optics".to_string(), vec![], Source::Class).unwrap();
        upsert_subject(&pool, "physics", Some("#374151".to_string())).unwrap();

        let updated = get_topic(&pool, &topic.get_id()).unwrap().unwrap();
        assert_eq!(updated.get_color(), "#374151");
    }

    #[test]
    fn test_rename_cascades_to_topics() {
        let pool = setup_test_db();

        let kept = create_topic(&pool, "Maths", "Limits".to_string(), vec![], Source::Class).unwrap();
        let other = create_topic(&pool, "History", "Rome".to_string(), vec![], Source::Book).unwrap();

        let renamed = rename_subject(&pool, "maths", "Mathematics", Some("#ec4899".to_string())).unwrap();
        assert_eq!(renamed.get_name(), "Mathematics");

        let updated = get_topic(&pool, &kept.get_id()).unwrap().unwrap();
        assert_eq!(updated.get_subject(), "Mathematics");
        assert_eq!(updated.get_color(), "#ec4899");

        // Unrelated topics are untouched
        let untouched = get_topic(&pool, &other.get_id()).unwrap().unwrap();
        assert_eq!(untouched.get_subject(), "History");
    }

    #[test]
    fn test_rename_missing_subject_fails() {
        let pool = setup_test_db();

        let result = rename_subject(&pool, "Nope", "Still nope", None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Subject not found"));
    }

    #[test]
    fn test_rename_rejects_collision() {
        let pool = setup_test_db();

        upsert_subject(&pool, "Maths", None).unwrap();
        upsert_subject(&pool, "History", None).unwrap();

        let result = rename_subject(&pool, "Maths", "history", None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already in use"));
    }

    #[test]
    fn test_rename_to_case_variant_of_itself() {
        let pool = setup_test_db();

        upsert_subject(&pool, "maths", None).unwrap();
        let renamed = rename_subject(&pool, "maths", "Maths", None).unwrap();

        assert_eq!(renamed.get_name(), "Maths");
    }

    #[test]
    fn test_delete_subject_cascades() {
        let pool = setup_test_db();

        let doomed = create_topic(&pool, "Maths", "Limits".to_string(), vec![], Source::Class).unwrap();
        record_review(&pool, &doomed.get_id(), 0).unwrap();
        let survivor = create_topic(&pool, "History", "Rome".to_string(), vec![], Source::Book).unwrap();

        delete_subject(&pool, "MATHS").unwrap();

        assert!(get_topic(&pool, &doomed.get_id()).unwrap().is_none());
        assert!(get_topic(&pool, &survivor.get_id()).unwrap().is_some());
        assert!(get_subject(&pool, "Maths").unwrap().is_none());
        assert!(crate::repo::review_counts(&pool).unwrap().is_empty());
    }
}
