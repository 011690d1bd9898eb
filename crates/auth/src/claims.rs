use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use flowdeck_core::{PlatformId, ProjectId, UserId};

use crate::{PlatformRole, Principal, ProjectMembership, ProjectRole, UserPrincipal};

/// Access token claims (transport-agnostic).
///
/// This is the minimal set of claims Flowdeck expects once a token has been
/// decoded and its signature verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Platform the user belongs to.
    pub platform_id: PlatformId,

    pub platform_role: PlatformRole,

    /// Project context, if the token was issued for one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_role: Option<ProjectRole>,

    pub issued_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl JwtClaims {
    /// Resolve the principal these claims describe.
    ///
    /// A project membership is only present when both the project id and the
    /// project role were issued.
    pub fn principal(&self) -> Principal {
        let project = match (self.project_id, self.project_role) {
            (Some(project_id), Some(role)) => Some(ProjectMembership { project_id, role }),
            _ => None,
        };

        Principal::User(UserPrincipal {
            user_id: self.sub,
            platform_id: self.platform_id,
            platform_role: self.platform_role,
            project,
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate the claim time window.
///
/// Signature verification happens in [`crate::jwt`].
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
