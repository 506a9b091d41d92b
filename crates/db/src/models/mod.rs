//! Entity models: one module per table, each with the row struct and its
//! create/update DTOs.

pub mod attendance;
pub mod auth_session;
pub mod category;
pub mod feedback;
pub mod notification;
pub mod password_reset;
pub mod registration;
pub mod session_completion;
pub mod training_session;
pub mod user;
