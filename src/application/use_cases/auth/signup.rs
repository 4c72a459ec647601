use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::domain::users::Role;

pub struct Signup<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub user_type: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum SignupError {
    #[error("Missing fields")]
    MissingFields,
    #[error("user_type must be candidate or recruiter")]
    UnknownRole,
    #[error("Email already exists")]
    EmailTaken,
    #[error("failed to create user")]
    Repo(#[source] anyhow::Error),
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl<'a, R: UserRepository + ?Sized> Signup<'a, R> {
    pub async fn execute(&self, req: &SignupRequest) -> Result<UserRow, SignupError> {
        let (name, email, password, user_type) = match (
            non_empty(&req.name),
            non_empty(&req.email),
            non_empty(&req.password),
            non_empty(&req.user_type),
        ) {
            (Some(n), Some(e), Some(p), Some(t)) => (n, e, p, t),
            _ => return Err(SignupError::MissingFields),
        };
        let role = Role::parse(user_type).ok_or(SignupError::UnknownRole)?;

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| SignupError::Repo(anyhow::anyhow!(e.to_string())))?
            .to_string();

        self.repo
            .create_user(email, name, &hash, role)
            .await
            .map_err(SignupError::Repo)?
            .ok_or(SignupError::EmailTaken)
    }
}
