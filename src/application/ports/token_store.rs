use async_trait::async_trait;
use uuid::Uuid;

/// Revocation list for refresh tokens, keyed by jti.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn revoke(
        &self,
        jti: Uuid,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<()>;
    async fn is_revoked(&self, jti: Uuid) -> anyhow::Result<bool>;
}
