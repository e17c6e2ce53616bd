pub mod auth_service;
pub mod event_service;
pub mod mentor_service;
pub mod notification_service;
pub mod request_service;
pub mod session_service;
pub mod sheets_service;
pub mod startup_service;
pub mod submission_service;
pub mod token_service;

pub use session_service::SessionManager;
