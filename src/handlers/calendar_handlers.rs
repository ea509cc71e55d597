use axum::{extract::State, Json};
use axum_extra::extract::Query;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::calendar::{self, CalendarDay};
use crate::db::DbPool;
use crate::dto::CalendarQueryDto;
use crate::errors::ApiError;
use crate::models::Topic;
use crate::repo;

/// Loads every topic paired with its completed-review count
fn topics_with_progress(pool: &DbPool) -> Result<Vec<(Topic, usize)>, ApiError> {
    let topics = repo::list_topics(pool).map_err(ApiError::Database)?;
    let counts = repo::review_counts(pool).map_err(ApiError::Database)?;

    Ok(topics
        .into_iter()
        .map(|topic| {
            let completed = counts.get(&topic.get_id()).copied().unwrap_or(0);
            (topic, completed)
        })
        .collect())
}

/// Handler for the week calendar view
///
/// This function handles GET requests to `/calendar/week`. Returns the 7
/// day cells of the week containing the reference date (today when
/// omitted), each with its label and the topics due on it.
#[instrument(skip(pool))]
pub async fn week_view_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the optional reference date from the query string
    Query(query): Query<CalendarQueryDto>,
) -> Result<Json<Vec<CalendarDay>>, ApiError> {
    let reference = query.reference.unwrap_or_else(|| Utc::now().date_naive());
    debug!("Building week view for {}", reference);

    let topics = topics_with_progress(&pool)?;
    let week = calendar::build_week(&topics, reference);

    info!("Built week view with {} topics placed", week.iter().map(|d| d.topics.len()).sum::<usize>());
    Ok(Json(week))
}

/// Handler for the month calendar view
///
/// This function handles GET requests to `/calendar/month`. Returns 4 rows
/// of 7 day cells: a fixed 28-day window anchored to the Monday of the
/// reference date's week, not a calendar month.
#[instrument(skip(pool))]
pub async fn month_view_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the optional reference date from the query string
    Query(query): Query<CalendarQueryDto>,
) -> Result<Json<Vec<Vec<CalendarDay>>>, ApiError> {
    let reference = query.reference.unwrap_or_else(|| Utc::now().date_naive());
    debug!("Building month view for {}", reference);

    let topics = topics_with_progress(&pool)?;
    let month = calendar::build_month(&topics, reference);

    Ok(Json(month))
}
