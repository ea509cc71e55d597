/// Web API Handlers
///
/// This module contains the handlers for the RESTful API endpoints.
/// Each handler is responsible for processing a specific type of HTTP
/// request, extracting the necessary data, calling the appropriate
/// repository or calendar functions, and returning a properly formatted
/// response.

mod topic_handlers;
mod review_handlers;
mod subject_handlers;
mod calendar_handlers;

// Re-export all handlers
pub use topic_handlers::*;
pub use review_handlers::*;
pub use subject_handlers::*;
pub use calendar_handlers::*;
