use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::user_repository::{UserRepository, UserRow};

pub struct Signin<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum SigninError {
    #[error("Missing fields")]
    MissingFields,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("failed to verify credentials")]
    Repo(#[source] anyhow::Error),
}

impl<'a, R: UserRepository + ?Sized> Signin<'a, R> {
    pub async fn execute(&self, req: &SigninRequest) -> Result<UserRow, SigninError> {
        let (email, password) = match (req.email.as_deref(), req.password.as_deref()) {
            (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
            _ => return Err(SigninError::MissingFields),
        };

        let row = self
            .repo
            .find_by_email(email)
            .await
            .map_err(SigninError::Repo)?
            .ok_or(SigninError::InvalidCredentials)?;

        let hash = row.password_hash.clone().unwrap_or_default();
        let parsed = PasswordHash::new(&hash)
            .map_err(|e| SigninError::Repo(anyhow::anyhow!(e.to_string())))?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(SigninError::InvalidCredentials);
        }

        Ok(UserRow {
            password_hash: None,
            ..row
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryUsers;
    use crate::application::use_cases::auth::signup::{Signup, SignupRequest};

    async fn seeded_users() -> InMemoryUsers {
        let users = InMemoryUsers::default();
        Signup { repo: &users }
            .execute(&SignupRequest {
                name: Some("Ada".into()),
                email: Some("ada@x.com".into()),
                password: Some("hunter2!".into()),
                user_type: Some("candidate".into()),
            })
            .await
            .unwrap();
        users
    }

    #[tokio::test]
    async fn correct_credentials_return_user() {
        let users = seeded_users().await;
        let uc = Signin { repo: &users };

        let row = uc
            .execute(&SigninRequest {
                email: Some("ada@x.com".into()),
                password: Some("hunter2!".into()),
            })
            .await
            .unwrap();
        assert_eq!(row.name, "Ada");
        assert!(row.password_hash.is_none());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let users = seeded_users().await;
        let uc = Signin { repo: &users };

        let err = uc
            .execute(&SigninRequest {
                email: Some("ada@x.com".into()),
                password: Some("wrong".into()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SigninError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_rejected() {
        let users = seeded_users().await;
        let uc = Signin { repo: &users };

        let err = uc
            .execute(&SigninRequest {
                email: Some("nobody@x.com".into()),
                password: Some("hunter2!".into()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SigninError::InvalidCredentials));
    }

    #[tokio::test]
    async fn missing_fields_rejected() {
        let users = seeded_users().await;
        let uc = Signin { repo: &users };

        let err = uc
            .execute(&SigninRequest {
                email: Some("ada@x.com".into()),
                password: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SigninError::MissingFields));
    }
}
