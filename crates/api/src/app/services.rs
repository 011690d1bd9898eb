use std::sync::Arc;

use flowdeck_auth::RolePermissions;
use flowdeck_core::PlatformId;
use flowdeck_templates::{
    InMemoryAuditLog, InMemoryPlatformStore, InMemoryTemplateStore, Platform, PlatformStore,
    StoreError, TemplateAuthority,
};

/// Shared application services.
///
/// In-memory infra wiring: the stores seeding writes to and the authority
/// that decides over them. The audit log is reachable only through the
/// authority.
#[derive(Clone)]
pub struct AppServices {
    templates: Arc<InMemoryTemplateStore>,
    platforms: Arc<InMemoryPlatformStore>,
    authority: TemplateAuthority,
}

impl AppServices {
    /// Fresh in-memory stores with the cloud platform registered and template
    /// management enabled on it.
    pub fn in_memory(cloud_platform_id: PlatformId, permissions: RolePermissions) -> Result<Self, StoreError> {
        let templates = Arc::new(InMemoryTemplateStore::new());
        let platforms = Arc::new(InMemoryPlatformStore::new());

        platforms.upsert(Platform {
            id: cloud_platform_id,
            name: "Cloud".to_string(),
            owner_id: None,
            manage_templates_enabled: true,
        })?;

        let authority = TemplateAuthority::new(
            templates.clone(),
            platforms.clone(),
            Arc::new(InMemoryAuditLog::new()),
            Arc::new(permissions),
            cloud_platform_id,
        );

        Ok(Self {
            templates,
            platforms,
            authority,
        })
    }

    pub fn authority(&self) -> &TemplateAuthority {
        &self.authority
    }

    pub fn templates(&self) -> &Arc<InMemoryTemplateStore> {
        &self.templates
    }

    pub fn platforms(&self) -> &Arc<InMemoryPlatformStore> {
        &self.platforms
    }
}
