//! Role → permission tables.
//!
//! The tables are built once (usually [`RolePermissions::builtin`]) and handed
//! to whoever makes decisions. Nothing here is global state.

use std::collections::{BTreeSet, HashMap};

use crate::permissions::{audit_log, flow_templates};
use crate::{Permission, PlatformRole, ProjectRole, UserPrincipal};

/// Built-in permissions of a platform role.
pub fn default_platform_permissions(role: PlatformRole) -> Vec<Permission> {
    match role {
        PlatformRole::Owner => vec![Permission::WILDCARD],
        PlatformRole::Admin => vec![flow_templates::READ, flow_templates::WRITE, audit_log::READ],
        PlatformRole::Member => vec![flow_templates::READ],
    }
}

/// Built-in permissions of a project role.
///
/// Project roles never grant template writes: templates are platform assets.
pub fn default_project_permissions(role: ProjectRole) -> Vec<Permission> {
    match role {
        ProjectRole::Admin | ProjectRole::Editor | ProjectRole::Operator | ProjectRole::Viewer => {
            vec![flow_templates::READ]
        }
    }
}

/// Immutable mapping from roles to granted permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissions {
    platform: HashMap<PlatformRole, Vec<Permission>>,
    project: HashMap<ProjectRole, Vec<Permission>>,
}

impl RolePermissions {
    /// Build a table from explicit mappings. Roles missing from a mapping
    /// grant nothing.
    pub fn new(
        platform: HashMap<PlatformRole, Vec<Permission>>,
        project: HashMap<ProjectRole, Vec<Permission>>,
    ) -> Self {
        Self { platform, project }
    }

    pub fn builtin() -> Self {
        let platform = PlatformRole::ALL
            .into_iter()
            .map(|r| (r, default_platform_permissions(r)))
            .collect();
        let project = ProjectRole::ALL
            .into_iter()
            .map(|r| (r, default_project_permissions(r)))
            .collect();
        Self { platform, project }
    }

    pub fn for_platform_role(&self, role: PlatformRole) -> &[Permission] {
        self.platform.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn for_project_role(&self, role: ProjectRole) -> &[Permission] {
        self.project.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Union of the user's platform-role and project-role permissions, sorted.
    pub fn effective_permissions(&self, user: &UserPrincipal) -> Vec<Permission> {
        let mut perms: BTreeSet<Permission> =
            self.for_platform_role(user.platform_role).iter().cloned().collect();
        if let Some(project) = &user.project {
            perms.extend(self.for_project_role(project.role).iter().cloned());
        }
        perms.into_iter().collect()
    }

    pub fn grants(&self, user: &UserPrincipal, required: &Permission) -> bool {
        self.effective_permissions(user)
            .iter()
            .any(|p| p.is_wildcard() || p == required)
    }
}

impl Default for RolePermissions {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProjectMembership;
    use flowdeck_core::{PlatformId, ProjectId, UserId};

    fn user(platform_role: PlatformRole, project_role: Option<ProjectRole>) -> UserPrincipal {
        UserPrincipal {
            user_id: UserId::new(),
            platform_id: PlatformId::new(),
            platform_role,
            project: project_role.map(|role| ProjectMembership {
                project_id: ProjectId::new(),
                role,
            }),
        }
    }

    #[test]
    fn owner_and_admin_can_write_templates() {
        let table = RolePermissions::builtin();
        assert!(table.grants(&user(PlatformRole::Owner, None), &flow_templates::WRITE));
        assert!(table.grants(&user(PlatformRole::Admin, None), &flow_templates::WRITE));
    }

    #[test]
    fn member_cannot_write_templates_even_as_project_admin() {
        let table = RolePermissions::builtin();
        let member = user(PlatformRole::Member, Some(ProjectRole::Admin));
        assert!(table.grants(&member, &flow_templates::READ));
        assert!(!table.grants(&member, &flow_templates::WRITE));
        assert!(!table.grants(&member, &audit_log::READ));
    }

    #[test]
    fn effective_permissions_are_deduplicated() {
        let table = RolePermissions::builtin();
        let member = user(PlatformRole::Member, Some(ProjectRole::Viewer));
        assert_eq!(table.effective_permissions(&member), vec![flow_templates::READ]);
    }

    #[test]
    fn roles_absent_from_custom_table_grant_nothing() {
        let table = RolePermissions::new(HashMap::new(), HashMap::new());
        assert!(table.for_platform_role(PlatformRole::Owner).is_empty());
        assert!(!table.grants(&user(PlatformRole::Owner, None), &flow_templates::READ));
    }
}
