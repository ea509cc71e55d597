use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::db::DbPool;
use crate::dto::CreateTopicDto;
use crate::errors::ApiError;
use crate::models::Topic;
use crate::repo;

/// Handler for creating a new topic
///
/// This function handles POST requests to `/topics`. The review schedule is
/// computed server-side at creation time and the subject color is assigned
/// from the palette.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The request payload containing the topic fields
///
/// ### Returns
///
/// The newly created topic as JSON
#[instrument(skip(pool), fields(subject = %payload.subject, title = %payload.title))]
pub async fn create_topic_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<CreateTopicDto>,
) -> Result<Json<Topic>, ApiError> {
    info!("Creating new topic");

    if payload.subject.trim().is_empty() {
        return Err(ApiError::InvalidSubject("Subject name must not be empty".to_string()));
    }

    let topic = repo::create_topic(&pool, &payload.subject, payload.title, payload.tags, payload.source)
        .map_err(ApiError::Database)?;

    info!("Successfully created topic with id: {}", topic.get_id());
    Ok(Json(topic))
}

/// Handler for retrieving a specific topic
///
/// This function handles GET requests to `/topics/{id}`.
///
/// ### Returns
///
/// The requested topic as JSON, or null if not found
#[instrument(skip(pool), fields(topic_id = %topic_id))]
pub async fn get_topic_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the topic ID from the URL path
    Path(topic_id): Path<String>,
) -> Result<Json<Option<Topic>>, ApiError> {
    debug!("Getting topic");

    let topic = repo::get_topic(&pool, &topic_id).map_err(ApiError::Database)?;

    Ok(Json(topic))
}

/// Handler for listing all topics
///
/// This function handles GET requests to `/topics`.
///
/// ### Returns
///
/// A list of all topics as JSON
#[instrument(skip(pool))]
pub async fn list_topics_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<Topic>>, ApiError> {
    debug!("Listing all topics");

    let all_topics = repo::list_topics(&pool).map_err(ApiError::Database)?;

    info!("Retrieved {} topics", all_topics.len());
    Ok(Json(all_topics))
}

/// Handler for deleting a topic
///
/// This function handles DELETE requests to `/topics/{id}`. The topic's
/// reviews are deleted with it.
#[instrument(skip(pool), fields(topic_id = %topic_id))]
pub async fn delete_topic_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the topic ID from the URL path
    Path(topic_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("Deleting topic");

    match repo::delete_topic(&pool, &topic_id) {
        Ok(()) => Ok(Json(serde_json::json!({ "success": true }))),
        Err(e) if e.to_string().contains("Topic not found") => {
            debug!("Topic not found");
            Err(ApiError::NotFound)
        }
        Err(e) => Err(ApiError::Database(e)),
    }
}
