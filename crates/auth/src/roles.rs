use serde::{Deserialize, Serialize};

/// Platform-wide role of a user.
///
/// The set is closed: permission lookup is an exhaustive match over these
/// variants (see [`crate::policy`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformRole {
    Owner,
    Admin,
    Member,
}

impl PlatformRole {
    pub const ALL: [PlatformRole; 3] = [PlatformRole::Owner, PlatformRole::Admin, PlatformRole::Member];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformRole::Owner => "OWNER",
            PlatformRole::Admin => "ADMIN",
            PlatformRole::Member => "MEMBER",
        }
    }
}

impl core::fmt::Display for PlatformRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a user inside a single project.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectRole {
    Admin,
    Editor,
    Operator,
    Viewer,
}

impl ProjectRole {
    pub const ALL: [ProjectRole; 4] = [
        ProjectRole::Admin,
        ProjectRole::Editor,
        ProjectRole::Operator,
        ProjectRole::Viewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectRole::Admin => "ADMIN",
            ProjectRole::Editor => "EDITOR",
            ProjectRole::Operator => "OPERATOR",
            ProjectRole::Viewer => "VIEWER",
        }
    }
}

impl core::fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_deserialize_from_wire_casing() {
        assert_eq!(serde_json::from_str::<PlatformRole>("\"OWNER\"").unwrap(), PlatformRole::Owner);
        assert!(serde_json::from_str::<PlatformRole>("\"SUPERUSER\"").is_err());
    }

    #[test]
    fn roles_serialize_in_wire_casing() {
        assert_eq!(serde_json::to_value(PlatformRole::Admin).unwrap(), "ADMIN");
        assert_eq!(serde_json::to_value(ProjectRole::Operator).unwrap(), "OPERATOR");
    }
}
