pub mod event_repository;
pub mod feedback_repository;
pub mod question_repository;
pub mod role_repository;
pub mod token_repository;
pub mod user_repository;

// Re-export all repositories for convenient access
pub use event_repository::EventRepository;
pub use feedback_repository::FeedbackRepository;
pub use question_repository::QuestionRepository;
pub use role_repository::RoleRepository;
pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;
