use uuid::Uuid;

use crate::domain::users::Role;

/// Authenticated identity attached to a request.
///
/// Presentation builds this from the access token plus a user lookup;
/// use cases only ever see `Caller`, never raw tokens.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("this action requires the {required} role")]
pub struct RoleMismatch {
    pub required: Role,
}

/// Single role guard used by every privileged use case.
pub fn require_role(caller: &Caller, required: Role) -> Result<(), RoleMismatch> {
    if caller.role == required {
        Ok(())
    } else {
        Err(RoleMismatch { required })
    }
}
