//! Repository structs: one per table, static async methods over `PgPool`.

pub mod attendance_repo;
pub mod auth_session_repo;
pub mod category_repo;
pub mod feedback_repo;
pub mod notification_repo;
pub mod password_reset_repo;
pub mod registration_repo;
pub mod session_completion_repo;
pub mod training_session_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use auth_session_repo::AuthSessionRepo;
pub use category_repo::CategoryRepo;
pub use feedback_repo::FeedbackRepo;
pub use notification_repo::NotificationRepo;
pub use password_reset_repo::PasswordResetRepo;
pub use registration_repo::RegistrationRepo;
pub use session_completion_repo::SessionCompletionRepo;
pub use training_session_repo::TrainingSessionRepo;
pub use user_repo::UserRepo;
