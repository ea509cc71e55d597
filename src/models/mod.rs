/// Data models module
///
/// This module defines the core data structures used throughout the
/// application. It includes database models that map to database tables, as
/// well as methods for creating and manipulating these models.

// Re-export all model types
mod date_list;
pub use date_list::DateList;

mod tag_list;
pub use tag_list::TagList;

mod source;
pub use source::Source;

mod topic;
pub use topic::Topic;

mod review;
pub use review::Review;

mod subject;
pub use subject::Subject;
