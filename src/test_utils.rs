use crate::db::{self, DbPool};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::connection::SimpleConnection;
use proptest::prelude::*;
use std::sync::Arc;

/// Sets up a test database with migrations applied
///
/// This function:
/// 1. Creates an in-memory SQLite database
/// 2. Enables foreign key constraints
/// 3. Runs all migrations to set up the schema
///
/// ### Returns
///
/// An Arc-wrapped database connection pool connected to the in-memory database
pub fn setup_test_db() -> Arc<DbPool> {
    // Use a unique shared in-memory database for each test.
    // Plain ":memory:" gives each connection its own separate database,
    // so migrations run on one connection wouldn't be visible on others.
    // By using a unique URI with cache=shared, all connections in this pool
    // share the same in-memory database while remaining isolated from other tests.
    let unique_id = uuid::Uuid::new_v4();
    let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
    let pool = db::init_pool(&database_url);

    // Get a connection from the pool
    let mut conn = pool.get().expect("Failed to get connection");

    // Enable foreign key constraints for SQLite
    conn.batch_execute("PRAGMA foreign_keys = ON").unwrap();

    // Run all migrations to set up the schema
    crate::run_migrations(&mut conn);

    // Wrap the pool in an Arc for thread-safe sharing
    Arc::new(pool)
}

/// Generates an arbitrary DateTime<Utc> within 2020-01-01 to 2030-01-01
pub fn arb_datetime_utc() -> impl Strategy<Value = DateTime<Utc>> {
    (1_577_836_800i64..1_893_456_000i64)
        .prop_map(|ts| DateTime::from_timestamp(ts, 0).unwrap())
}

/// Generates an arbitrary calendar date within 2020-01-01 to 2030-01-01
pub fn arb_naive_date() -> impl Strategy<Value = NaiveDate> {
    arb_datetime_utc().prop_map(|dt| dt.date_naive())
}

/// Generates an arbitrary subject name with mixed case
pub fn arb_subject_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z ]{0,30}"
}

/// Generates a valid 0-based review index
pub fn arb_review_index() -> impl Strategy<Value = i32> {
    0i32..crate::scheduler::REVIEW_COUNT as i32
}
