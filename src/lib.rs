/// Engram: A Study Scheduling Library
///
/// This library provides the core functionality for a personal study
/// scheduler built on fixed-interval spaced repetition: topics receive a
/// 7-step review schedule at creation, reviews are completed strictly in
/// order, and week/month calendar views bucket topics by their next due
/// review.
///
/// The name "Engram" refers to the physical trace a memory leaves in the
/// brain, which is what the review schedule is meant to reinforce.
///
/// ### Modules
///
/// - `scheduler`: The fixed interval table and due/overdue resolution
/// - `calendar`: Week/month windows and date bucketing
/// - `palette`: Subject color assignment
/// - `db`: Database connection management
/// - `models`: Data structures for topics, reviews, and subjects
/// - `repo`: Repository layer for database operations
/// - `schema`: Database schema definitions
///
/// ### Web API
///
/// The library exposes a RESTful API using Axum with the following
/// endpoints:
///
/// - `POST /topics`, `GET /topics`, `GET /topics/{id}`, `DELETE /topics/{id}`
/// - `GET /topics/{id}/reviews`
/// - `POST /reviews`: Complete a topic's next review
/// - `GET /subjects`, `POST /subjects`, `PATCH /subjects/{name}`,
///   `DELETE /subjects/{name}`
/// - `GET /calendar/week`, `GET /calendar/month`

/// Spaced repetition scheduling module
pub mod scheduler;

/// Calendar windowing and bucketing module
pub mod calendar;

/// Subject color palette module
pub mod palette;

/// Database connection module
pub mod db;

/// Data models module
pub mod models;

/// Repository module for database operations
pub mod repo;

/// Database schema module
pub mod schema;

/// Configuration module
pub mod config;

/// Web API handlers module
pub mod handlers;

/// Data transfer objects module
pub mod dto;

/// API error types module
pub mod errors;

#[cfg(test)]
pub mod test_utils;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Creates the application router with all routes
///
/// This function sets up the Axum router with all the API endpoints.
///
/// ### Arguments
///
/// * `pool` - The database connection pool to be shared with all handlers
///
/// ### Returns
///
/// An Axum Router configured with all routes and the database pool as state
pub fn create_app(pool: Arc<db::DbPool>) -> Router {
    Router::new()
        // Routes for creating and listing topics
        .route("/topics", post(handlers::create_topic_handler).get(handlers::list_topics_handler))
        // Routes for getting and deleting a specific topic
        .route(
            "/topics/{id}",
            get(handlers::get_topic_handler).delete(handlers::delete_topic_handler),
        )
        // Route for listing a topic's completed reviews
        .route("/topics/{id}/reviews", get(handlers::list_reviews_by_topic_handler))
        // Route for completing a review
        .route("/reviews", post(handlers::create_review_handler))
        // Routes for listing and upserting subjects
        .route(
            "/subjects",
            get(handlers::list_subjects_handler).post(handlers::upsert_subject_handler),
        )
        // Routes for renaming and deleting a subject
        .route(
            "/subjects/{name}",
            axum::routing::patch(handlers::rename_subject_handler).delete(handlers::delete_subject_handler),
        )
        // Routes for the calendar views
        .route("/calendar/week", get(handlers::week_view_handler))
        .route("/calendar/month", get(handlers::month_view_handler))
        // Allow browser clients on other origins
        .layer(CorsLayer::permissive())
        // Add the database pool to the application state
        .with_state(pool)
}

/// Runs the embedded migrations
///
/// This function applies all database migrations to set up the schema.
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
///
/// ### Panics
///
/// This function will panic if the migrations fail to run
pub fn run_migrations(conn: &mut diesel::SqliteConnection) {
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    // Define the embedded migrations
    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    // Run all pending migrations
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
}
