use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::db::DbPool;
use crate::dto::CreateReviewDto;
use crate::errors::ApiError;
use crate::models::Review;
use crate::repo;

/// Handler for completing a review
///
/// This function handles POST requests to `/reviews`. The supplied index
/// must be the topic's next uncompleted review; out-of-order and duplicate
/// completions are rejected.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The request payload containing the topic ID and review index
///
/// ### Returns
///
/// The newly created review as JSON
#[instrument(skip(pool), fields(topic_id = %payload.topic_id, review_index = %payload.review_index))]
pub async fn create_review_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<CreateReviewDto>,
) -> Result<Json<Review>, ApiError> {
    info!("Recording review completion");

    match repo::record_review(&pool, &payload.topic_id, payload.review_index) {
        Ok(review) => {
            info!("Successfully created review with id: {}", review.get_id());
            Ok(Json(review))
        }
        Err(e) => {
            let message = e.to_string();
            if message.contains("Topic not found") {
                debug!("Topic not found");
                Err(ApiError::NotFound)
            } else if message.contains("Review index") || message.contains("already completed") {
                warn!("Rejected review completion: {}", message);
                Err(ApiError::InvalidReviewIndex(message))
            } else {
                Err(ApiError::Database(e))
            }
        }
    }
}

/// Handler for listing all reviews of a topic
///
/// This function handles GET requests to `/topics/{id}/reviews`.
///
/// ### Returns
///
/// The topic's reviews in completion order as JSON
#[instrument(skip(pool), fields(topic_id = %topic_id))]
pub async fn list_reviews_by_topic_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the topic ID from the URL path
    Path(topic_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    debug!("Listing reviews for topic");

    // First check that the topic exists
    let topic = repo::get_topic(&pool, &topic_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    let reviews = repo::get_reviews_for_topic(&pool, &topic.get_id()).map_err(ApiError::Database)?;

    info!("Retrieved {} reviews for topic {}", reviews.len(), topic_id);
    Ok(Json(reviews))
}
