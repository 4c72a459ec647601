use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::token_store::RefreshTokenStore;
use crate::infrastructure::db::PgPool;

pub struct SqlxRevokedTokenRepository {
    pub pool: PgPool,
}

impl SqlxRevokedTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for SqlxRevokedTokenRepository {
    async fn revoke(
        &self,
        jti: Uuid,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO revoked_tokens (jti, expires_at) VALUES ($1, $2)
               ON CONFLICT (jti) DO NOTHING"#,
        )
        .bind(jti)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn is_revoked(&self, jti: Uuid) -> anyhow::Result<bool> {
        let revoked = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)"#,
        )
        .bind(jti)
        .fetch_one(&self.pool)
        .await?;
        Ok(revoked)
    }
}
