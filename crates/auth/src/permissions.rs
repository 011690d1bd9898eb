use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "flow_templates.read").
/// The wildcard permission `"*"` grants everything and is reserved for the
/// platform owner in the built-in tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const WILDCARD: Permission = Permission::from_static("*");

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flow template permissions.
pub mod flow_templates {
    use super::Permission;

    pub const READ: Permission = Permission::from_static("flow_templates.read");
    /// Create and delete.
    pub const WRITE: Permission = Permission::from_static("flow_templates.write");
}

/// Audit log permissions.
pub mod audit_log {
    use super::Permission;

    pub const READ: Permission = Permission::from_static("audit_log.read");
}
