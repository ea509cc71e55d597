use std::collections::HashMap;

use crate::db::DbPool;
use crate::models::{Review, Topic};
use crate::scheduler::REVIEW_COUNT;
use crate::schema::{reviews, topics};
use anyhow::{anyhow, Result};
use chrono::Utc;
use diesel::prelude::*;

/// Records the completion of a topic's next scheduled review
///
/// `review_index` is the 0-based position within the 7-step schedule and
/// must equal the number of reviews already recorded: reviews are completed
/// strictly in order, and duplicate or out-of-order completion is rejected
/// rather than trusted. Recording the 7th review marks the topic completed.
/// The review insert and the completed-flag update share a transaction, so
/// a failed write leaves the topic untouched.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `topic_id` - The ID of the topic being reviewed
/// * `review_index` - 0-based index of the review being completed
///
/// ### Returns
///
/// A Result containing the newly created Review if successful
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database operations fail
/// - The topic does not exist or is already completed
/// - The index is outside 0-6 or does not match the next expected review
pub fn record_review(pool: &DbPool, topic_id: &str, review_index: i32) -> Result<Review> {
    let conn = &mut pool.get()?;

    if review_index < 0 || review_index >= REVIEW_COUNT as i32 {
        return Err(anyhow!(
            "Review index must be between 0 and {}, got {}",
            REVIEW_COUNT - 1,
            review_index
        ));
    }

    conn.transaction(|conn| {
        let topic = topics::table
            .find(topic_id)
            .first::<Topic>(conn)
            .optional()?
            .ok_or_else(|| anyhow!("Topic not found"))?;

        if topic.is_completed() {
            return Err(anyhow!("Topic is already completed"));
        }

        let completed_so_far: i64 = reviews::table
            .filter(reviews::topic_id.eq(topic_id))
            .count()
            .get_result(conn)?;

        if i64::from(review_index) != completed_so_far {
            return Err(anyhow!(
                "Review index {} out of order, expected {}",
                review_index,
                completed_so_far
            ));
        }

        let new_review = Review::new(topic_id, review_index + 1);
        diesel::insert_into(reviews::table)
            .values(&new_review)
            .execute(conn)?;

        if completed_so_far + 1 >= REVIEW_COUNT as i64 {
            diesel::update(topics::table.find(topic_id))
                .set((
                    topics::completed.eq(true),
                    topics::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)?;
        }

        Ok(new_review)
    })
}

/// Gets all reviews for a topic, in completion order
pub fn get_reviews_for_topic(pool: &DbPool, topic_id: &str) -> Result<Vec<Review>> {
    let conn = &mut pool.get()?;

    let topic_reviews = reviews::table
        .filter(reviews::topic_id.eq(topic_id))
        .order_by(reviews::review_number.asc())
        .load::<Review>(conn)?;

    Ok(topic_reviews)
}

/// Counts completed reviews per topic across the whole collection
///
/// Topics with no reviews are absent from the map; callers treat a missing
/// entry as zero.
pub fn review_counts(pool: &DbPool) -> Result<HashMap<String, usize>> {
    let conn = &mut pool.get()?;

    let counts: Vec<(String, i64)> = reviews::table
        .group_by(reviews::topic_id)
        .select((reviews::topic_id, diesel::dsl::count_star()))
        .load(conn)?;

    Ok(counts.into_iter().map(|(id, n)| (id, n as usize)).collect())
}
