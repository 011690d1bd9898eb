use serde::{Deserialize, Serialize};

use flowdeck_core::{PlatformId, ProjectId, UserId};

use crate::{PlatformRole, ProjectRole};

/// A user's membership in one project.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMembership {
    pub project_id: ProjectId,
    pub role: ProjectRole,
}

/// An authenticated user acting within exactly one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPrincipal {
    pub user_id: UserId,
    pub platform_id: PlatformId,
    pub platform_role: PlatformRole,
    pub project: Option<ProjectMembership>,
}

/// The actor behind a request.
///
/// Construction is decoupled from transport: the API layer derives this from
/// verified token claims and trusts it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    User(UserPrincipal),
}

impl Principal {
    pub fn user(&self) -> Option<&UserPrincipal> {
        match self {
            Principal::Anonymous => None,
            Principal::User(user) => Some(user),
        }
    }

    /// Platform the principal is scoped to (`None` for anonymous callers).
    pub fn platform_id(&self) -> Option<PlatformId> {
        self.user().map(|u| u.platform_id)
    }
}

impl core::fmt::Display for Principal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Principal::Anonymous => f.write_str("anonymous"),
            Principal::User(u) => write!(f, "user:{}@{}", u.user_id, u.platform_id),
        }
    }
}
