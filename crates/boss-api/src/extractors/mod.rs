//! Axum extractors for request handling
//!
//! Custom extractors for the authenticated caller, the request deadline and
//! validated bodies.

mod auth;
mod deadline;
mod validated;

pub use auth::CurrentUser;
pub use deadline::RequestDeadline;
pub use validated::ValidatedJson;
