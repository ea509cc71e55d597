use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::db::DbPool;
use crate::dto::{RenameSubjectDto, UpsertSubjectDto};
use crate::errors::ApiError;
use crate::models::Subject;
use crate::repo;

/// Handler for listing all subjects
///
/// This function handles GET requests to `/subjects`.
#[instrument(skip(pool))]
pub async fn list_subjects_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<Subject>>, ApiError> {
    debug!("Listing all subjects");

    let all_subjects = repo::list_subjects(&pool).map_err(ApiError::Database)?;

    info!("Retrieved {} subjects", all_subjects.len());
    Ok(Json(all_subjects))
}

/// Handler for creating or recoloring a subject
///
/// This function handles POST requests to `/subjects`. An existing subject
/// (matched case-insensitively) has its color updated; a new one is created
/// with the supplied color, or the first unused palette color.
#[instrument(skip(pool), fields(subject = %payload.subject))]
pub async fn upsert_subject_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<UpsertSubjectDto>,
) -> Result<Json<Subject>, ApiError> {
    info!("Upserting subject");

    if payload.subject.trim().is_empty() {
        return Err(ApiError::InvalidSubject("Subject name must not be empty".to_string()));
    }

    let subject = repo::upsert_subject(&pool, &payload.subject, payload.color).map_err(ApiError::Database)?;

    Ok(Json(subject))
}

/// Handler for renaming a subject
///
/// This function handles PATCH requests to `/subjects/{name}`. The new name
/// and color cascade to every topic of the subject.
#[instrument(skip(pool), fields(subject = %name, new_subject = %payload.new_subject))]
pub async fn rename_subject_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the current subject name from the URL path
    Path(name): Path<String>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<RenameSubjectDto>,
) -> Result<Json<Subject>, ApiError> {
    info!("Renaming subject");

    if payload.new_subject.trim().is_empty() {
        return Err(ApiError::InvalidSubject("Subject name must not be empty".to_string()));
    }

    match repo::rename_subject(&pool, &name, &payload.new_subject, payload.new_color) {
        Ok(subject) => Ok(Json(subject)),
        Err(e) => {
            let message = e.to_string();
            if message.contains("Subject not found") {
                debug!("Subject not found");
                Err(ApiError::NotFound)
            } else if message.contains("already in use") {
                warn!("Rejected rename: {}", message);
                Err(ApiError::InvalidSubject(message))
            } else {
                Err(ApiError::Database(e))
            }
        }
    }
}

/// Handler for deleting a subject
///
/// This function handles DELETE requests to `/subjects/{name}`. All topics
/// of the subject, and their reviews, are deleted with it.
#[instrument(skip(pool), fields(subject = %name))]
pub async fn delete_subject_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the subject name from the URL path
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("Deleting subject and its topics");

    match repo::delete_subject(&pool, &name) {
        Ok(()) => Ok(Json(serde_json::json!({ "success": true }))),
        Err(e) if e.to_string().contains("Subject not found") => {
            debug!("Subject not found");
            Err(ApiError::NotFound)
        }
        Err(e) => Err(ApiError::Database(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use crate::repo::create_topic;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_upsert_subject_handler() {
        let pool = setup_test_db();

        let payload = UpsertSubjectDto {
            subject: "Chemistry".to_string(),
            color: Some("#06b6d4".to_string()),
        };

        let result = upsert_subject_handler(State(pool.clone()), Json(payload)).await.unwrap();

        assert_eq!(result.0.get_name(), "Chemistry");
        assert_eq!(result.0.get_color(), "#06b6d4");
    }

    #[tokio::test]
    async fn test_rename_subject_handler_cascades() {
        let pool = setup_test_db();
        let topic = create_topic(&pool, "Chem", "Alkanes".to_string(), vec![], Source::Book).unwrap();

        let payload = RenameSubjectDto {
            new_subject: "Chemistry".to_string(),
            new_color: None,
        };

        let result = rename_subject_handler(State(pool.clone()), Path("chem".to_string()), Json(payload))
            .await
            .unwrap();
        assert_eq!(result.0.get_name(), "Chemistry");

        let updated = repo::get_topic(&pool, &topic.get_id()).unwrap().unwrap();
        assert_eq!(updated.get_subject(), "Chemistry");
    }

    #[tokio::test]
    async fn test_rename_subject_handler_not_found() {
        let pool = setup_test_db();

        let payload = RenameSubjectDto {
            new_subject: "Anything".to_string(),
            new_color: None,
        };

        let result = rename_subject_handler(State(pool.clone()), Path("missing".to_string()), Json(payload)).await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ApiError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_subject_handler() {
        let pool = setup_test_db();
        let topic = create_topic(&pool, "Chem", "Alkanes".to_string(), vec![], Source::Book).unwrap();

        let result = delete_subject_handler(State(pool.clone()), Path("chem".to_string())).await;
        assert!(result.is_ok());

        assert!(repo::get_topic(&pool, &topic.get_id()).unwrap().is_none());
    }
}
