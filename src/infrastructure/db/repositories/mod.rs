pub mod application_repository_sqlx;
pub mod job_repository_sqlx;
pub mod revoked_token_repository_sqlx;
pub mod user_repository_sqlx;

use crate::domain::users::Role;

pub(crate) fn parse_role(raw: &str) -> anyhow::Result<Role> {
    Role::parse(raw).ok_or_else(|| anyhow::anyhow!("unexpected role value in store: {raw}"))
}
