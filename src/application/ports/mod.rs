pub mod application_repository;
pub mod job_repository;
pub mod mailer;
pub mod token_store;
pub mod user_repository;
