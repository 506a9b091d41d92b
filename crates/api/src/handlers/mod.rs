//! HTTP handlers, one module per resource.

pub mod attendance;
pub mod auth;
pub mod feedback;
pub mod notification;
pub mod registration;
pub mod session_completion;
pub mod training_session;
pub mod user;
