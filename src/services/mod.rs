pub mod auth_service;
pub mod competence_service;
pub mod password;

pub use auth_service::AuthService;
pub use competence_service::CompetenceService;
