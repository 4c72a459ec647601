use uuid::Uuid;

use crate::application::ports::token_store::RefreshTokenStore;

/// Records a refresh token's jti in the revocation list. Revoking the same
/// token twice is a no-op.
pub struct Logout<'a, S: RefreshTokenStore + ?Sized> {
    pub tokens: &'a S,
}

impl<'a, S: RefreshTokenStore + ?Sized> Logout<'a, S> {
    pub async fn execute(
        &self,
        jti: Uuid,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<()> {
        self.tokens.revoke(jti, expires_at).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryRevocations;
    use crate::application::use_cases::auth::refresh::{RefreshAccess, RefreshError};

    #[tokio::test]
    async fn revoked_token_cannot_refresh_again() {
        let store = InMemoryRevocations::default();
        let jti = Uuid::new_v4();

        let refresh = RefreshAccess { tokens: &store };
        refresh.execute(jti).await.unwrap();

        Logout { tokens: &store }
            .execute(jti, chrono::Utc::now() + chrono::Duration::days(14))
            .await
            .unwrap();

        let err = refresh.execute(jti).await.unwrap_err();
        assert!(matches!(err, RefreshError::Revoked));
    }

    #[tokio::test]
    async fn double_logout_is_idempotent() {
        let store = InMemoryRevocations::default();
        let jti = Uuid::new_v4();
        let exp = chrono::Utc::now() + chrono::Duration::days(14);

        let uc = Logout { tokens: &store };
        uc.execute(jti, exp).await.unwrap();
        uc.execute(jti, exp).await.unwrap();
    }
}
