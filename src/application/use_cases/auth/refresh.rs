use uuid::Uuid;

use crate::application::ports::token_store::RefreshTokenStore;

/// Gate for the refresh-token exchange: the token must not be on the
/// revocation list. Signature and expiry checks happen at the HTTP layer.
pub struct RefreshAccess<'a, S: RefreshTokenStore + ?Sized> {
    pub tokens: &'a S,
}

#[derive(thiserror::Error, Debug)]
pub enum RefreshError {
    #[error("refresh token has been revoked")]
    Revoked,
    #[error("failed to check revocation list")]
    Repo(#[source] anyhow::Error),
}

impl<'a, S: RefreshTokenStore + ?Sized> RefreshAccess<'a, S> {
    pub async fn execute(&self, jti: Uuid) -> Result<(), RefreshError> {
        if self
            .tokens
            .is_revoked(jti)
            .await
            .map_err(RefreshError::Repo)?
        {
            return Err(RefreshError::Revoked);
        }
        Ok(())
    }
}
