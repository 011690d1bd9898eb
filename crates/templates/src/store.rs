use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use flowdeck_core::{PlatformId, TemplateId};

use crate::{AuditEvent, Platform, Template};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("duplicate id: {0}")]
    Duplicate(String),
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

/// Template persistence.
///
/// Implementations must serialize concurrent deletes of the same id: exactly
/// one caller observes `Ok(true)`, every other caller `Ok(false)`.
pub trait TemplateStore: Send + Sync {
    /// Candidate templates for a viewer: every public template (see
    /// [`Template::is_public`]) plus, when a platform is given, that
    /// platform's own templates.
    fn find_by_platform_or_cloud(
        &self,
        platform_id: Option<PlatformId>,
        cloud_platform_id: PlatformId,
    ) -> Result<Vec<Template>, StoreError>;
    fn find_by_id(&self, id: TemplateId) -> Result<Option<Template>, StoreError>;
    fn insert(&self, template: Template) -> Result<(), StoreError>;
    /// Returns whether a template was removed.
    fn delete(&self, id: TemplateId) -> Result<bool, StoreError>;
}

impl<S> TemplateStore for Arc<S>
where
    S: TemplateStore + ?Sized,
{
    fn find_by_platform_or_cloud(
        &self,
        platform_id: Option<PlatformId>,
        cloud_platform_id: PlatformId,
    ) -> Result<Vec<Template>, StoreError> {
        (**self).find_by_platform_or_cloud(platform_id, cloud_platform_id)
    }

    fn find_by_id(&self, id: TemplateId) -> Result<Option<Template>, StoreError> {
        (**self).find_by_id(id)
    }

    fn insert(&self, template: Template) -> Result<(), StoreError> {
        (**self).insert(template)
    }

    fn delete(&self, id: TemplateId) -> Result<bool, StoreError> {
        (**self).delete(id)
    }
}

/// In-memory template store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryTemplateStore {
    inner: RwLock<HashMap<TemplateId, Template>>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn find_by_platform_or_cloud(
        &self,
        platform_id: Option<PlatformId>,
        cloud_platform_id: PlatformId,
    ) -> Result<Vec<Template>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map
            .values()
            .filter(|t| t.is_public(cloud_platform_id) || Some(t.platform_id) == platform_id)
            .cloned()
            .collect())
    }

    fn find_by_id(&self, id: TemplateId) -> Result<Option<Template>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(&id).cloned())
    }

    fn insert(&self, template: Template) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        if map.contains_key(&template.id) {
            return Err(StoreError::Duplicate(template.id.to_string()));
        }
        map.insert(template.id, template);
        Ok(())
    }

    fn delete(&self, id: TemplateId) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.remove(&id).is_some())
    }
}

/// Platform lookup (feature flags, ownership).
pub trait PlatformStore: Send + Sync {
    fn get(&self, id: PlatformId) -> Result<Option<Platform>, StoreError>;
    fn upsert(&self, platform: Platform) -> Result<(), StoreError>;
}

impl<S> PlatformStore for Arc<S>
where
    S: PlatformStore + ?Sized,
{
    fn get(&self, id: PlatformId) -> Result<Option<Platform>, StoreError> {
        (**self).get(id)
    }

    fn upsert(&self, platform: Platform) -> Result<(), StoreError> {
        (**self).upsert(platform)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPlatformStore {
    inner: RwLock<HashMap<PlatformId, Platform>>,
}

impl InMemoryPlatformStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlatformStore for InMemoryPlatformStore {
    fn get(&self, id: PlatformId) -> Result<Option<Platform>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(&id).cloned())
    }

    fn upsert(&self, platform: Platform) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(platform.id, platform);
        Ok(())
    }
}

/// Append-only, platform-scoped audit trail.
pub trait AuditLog: Send + Sync {
    fn append(&self, event: AuditEvent) -> Result<(), StoreError>;
    /// Events of one platform, in append order.
    fn list(&self, platform_id: PlatformId) -> Result<Vec<AuditEvent>, StoreError>;
}

impl<S> AuditLog for Arc<S>
where
    S: AuditLog + ?Sized,
{
    fn append(&self, event: AuditEvent) -> Result<(), StoreError> {
        (**self).append(event)
    }

    fn list(&self, platform_id: PlatformId) -> Result<Vec<AuditEvent>, StoreError> {
        (**self).list(platform_id)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    inner: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditLog for InMemoryAuditLog {
    fn append(&self, event: AuditEvent) -> Result<(), StoreError> {
        self.inner.write().map_err(poisoned)?.push(event);
        Ok(())
    }

    fn list(&self, platform_id: PlatformId) -> Result<Vec<AuditEvent>, StoreError> {
        let events = self.inner.read().map_err(poisoned)?;
        Ok(events
            .iter()
            .filter(|e| e.platform_id == platform_id)
            .cloned()
            .collect())
    }
}
