use thiserror::Error;

use flowdeck_core::PlatformId;

use crate::{Permission, Principal, RolePermissions, UserPrincipal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("platform mismatch")]
    PlatformMismatch,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Authorize a principal for `required` on resources owned by `platform_id`.
///
/// Deny by default: only an authenticated user of the same platform whose
/// roles grant the permission gets through. Returns the user on success.
///
/// - No IO
/// - No panics
pub fn authorize<'a>(
    principal: &'a Principal,
    platform_id: PlatformId,
    required: &Permission,
    table: &RolePermissions,
) -> Result<&'a UserPrincipal, AuthzError> {
    let user = principal.user().ok_or(AuthzError::Unauthenticated)?;

    if user.platform_id != platform_id {
        return Err(AuthzError::PlatformMismatch);
    }

    if table.grants(user, required) {
        Ok(user)
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}
