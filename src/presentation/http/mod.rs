pub mod applications;
pub mod auth;
pub mod error;
pub mod extract;
pub mod health;
pub mod jobs;
