/// Repository module
///
/// This module provides the data access layer for the application.
/// It contains functions for interacting with the database, including
/// creating, retrieving, and updating topics, reviews, and subjects.
///
/// The repository pattern abstracts away the details of database access
/// and provides a clean API for the rest of the application to use.

mod topic_repo;
mod review_repo;
mod subject_repo;

// Re-export all repository functions
pub use topic_repo::*;
pub use review_repo::*;
pub use subject_repo::*;
