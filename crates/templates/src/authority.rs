//! Template visibility and access decisions.
//!
//! Every rule about who may see or change a template lives here. The authority
//! owns no mutable state: it reads the permission table and the stores it was
//! built with, and the template store serializes concurrent mutations.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use flowdeck_auth::permissions::{audit_log, flow_templates};
use flowdeck_auth::{authorize, AuthzError, Permission, Principal, RolePermissions, UserPrincipal};
use flowdeck_core::{AuditEventId, DomainError, PlatformId, TemplateId};

use crate::{
    AuditAction, AuditEvent, AuditLog, NewTemplate, PageRequest, PlatformStore, SeekPage,
    StoreError, Template, TemplateStore, TemplateType,
};

/// Why an action was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    Anonymous,
    PlatformMismatch,
    MissingPermission(Permission),
    /// The platform is unknown or has template management switched off.
    FeatureDisabled,
}

impl DenyReason {
    pub fn label(&self) -> &'static str {
        match self {
            DenyReason::Anonymous => "anonymous",
            DenyReason::PlatformMismatch => "platform_mismatch",
            DenyReason::MissingPermission(_) => "missing_permission",
            DenyReason::FeatureDisabled => "feature_disabled",
        }
    }
}

impl From<AuthzError> for DenyReason {
    fn from(value: AuthzError) -> Self {
        match value {
            AuthzError::Unauthenticated => DenyReason::Anonymous,
            AuthzError::PlatformMismatch => DenyReason::PlatformMismatch,
            AuthzError::Forbidden(perm) => DenyReason::MissingPermission(Permission::new(perm)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("forbidden: {}", .0.label())]
    Forbidden(DenyReason),

    #[error("template not found")]
    NotFound,

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Filters and paging for template listings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateQuery {
    pub search: Option<String>,
    /// A template must carry every listed tag.
    pub tags: Vec<String>,
    pub page: PageRequest,
}

/// Whether `principal` may see `template`.
///
/// Public templates (`CLOUD`, or owned by the cloud platform) are visible to
/// everyone; other templates only to users of the owning platform.
pub fn is_visible(principal: &Principal, template: &Template, cloud_platform_id: PlatformId) -> bool {
    template.is_public(cloud_platform_id) || principal.platform_id() == Some(template.platform_id)
}

/// Template Visibility & Access Authority.
#[derive(Clone)]
pub struct TemplateAuthority {
    templates: Arc<dyn TemplateStore>,
    platforms: Arc<dyn PlatformStore>,
    audit: Arc<dyn AuditLog>,
    permissions: Arc<RolePermissions>,
    cloud_platform_id: PlatformId,
}

impl TemplateAuthority {
    pub fn new(
        templates: Arc<dyn TemplateStore>,
        platforms: Arc<dyn PlatformStore>,
        audit: Arc<dyn AuditLog>,
        permissions: Arc<RolePermissions>,
        cloud_platform_id: PlatformId,
    ) -> Self {
        Self {
            templates,
            platforms,
            audit,
            permissions,
            cloud_platform_id,
        }
    }

    pub fn cloud_platform_id(&self) -> PlatformId {
        self.cloud_platform_id
    }

    /// Every template the principal may see, deduplicated by id, newest first.
    pub fn list_visible(&self, principal: &Principal) -> Result<Vec<Template>, TemplateError> {
        let candidates = self
            .templates
            .find_by_platform_or_cloud(principal.platform_id(), self.cloud_platform_id)?;

        let mut seen: HashSet<TemplateId> = HashSet::new();
        let mut visible: Vec<Template> = candidates
            .into_iter()
            .filter(|t| is_visible(principal, t, self.cloud_platform_id))
            .filter(|t| seen.insert(t.id))
            .collect();

        visible.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| b.id.cmp(&a.id)));
        Ok(visible)
    }

    /// Visible templates narrowed by `query`, one page at a time.
    pub fn list(&self, principal: &Principal, query: &TemplateQuery) -> Result<SeekPage<Template>, TemplateError> {
        let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let matching: Vec<Template> = self
            .list_visible(principal)?
            .into_iter()
            .filter(|t| search.is_none_or(|s| t.matches_search(s)))
            .filter(|t| t.has_all_tags(&query.tags))
            .collect();

        Ok(SeekPage::paginate(matching, query.page))
    }

    /// A single template. Invisible and absent look the same to the caller.
    pub fn get(&self, principal: &Principal, id: TemplateId) -> Result<Template, TemplateError> {
        match self.templates.find_by_id(id)? {
            Some(template) if is_visible(principal, &template, self.cloud_platform_id) => Ok(template),
            _ => Err(TemplateError::NotFound),
        }
    }

    /// Decide whether `principal` may delete `template`.
    ///
    /// Deny by default; the only Allow is a user of the owning platform with
    /// template-write permission on a platform that has template management on.
    pub fn authorize_delete(&self, principal: &Principal, template: &Template) -> Result<AccessDecision, StoreError> {
        if let Err(e) = authorize(principal, template.platform_id, &flow_templates::WRITE, &self.permissions) {
            return Ok(AccessDecision::Deny(e.into()));
        }
        if !self.templates_enabled(template.platform_id)? {
            return Ok(AccessDecision::Deny(DenyReason::FeatureDisabled));
        }
        Ok(AccessDecision::Allow)
    }

    /// Delete a template.
    ///
    /// Callers without template-write rights on their own platform are refused
    /// before the store is consulted. A template the caller cannot see answers
    /// exactly like an absent one, so existence never leaks across platforms.
    pub fn delete(&self, principal: &Principal, id: TemplateId) -> Result<(), TemplateError> {
        let user = self.authorize_manage(principal, Some(id))?;

        let template = self
            .templates
            .find_by_id(id)?
            .filter(|t| is_visible(principal, t, self.cloud_platform_id))
            .ok_or(TemplateError::NotFound)?;

        if let AccessDecision::Deny(reason) = self.authorize_delete(principal, &template)? {
            return Err(self.deny(principal, Some(id), reason));
        }

        // Lost a race with a concurrent delete.
        if !self.templates.delete(id)? {
            return Err(TemplateError::NotFound);
        }

        self.record(user, AuditAction::FlowTemplateDeleted, &template)?;
        tracing::info!(
            principal = %principal,
            template_id = %id,
            platform_id = %template.platform_id,
            "flow template deleted"
        );
        Ok(())
    }

    /// Create a template on the principal's own platform.
    ///
    /// Templates created on the cloud platform are `CLOUD`, all others
    /// `PLATFORM`.
    pub fn create(&self, principal: &Principal, input: NewTemplate) -> Result<Template, TemplateError> {
        let user = self.authorize_manage(principal, None)?;
        let input = input.normalized()?;

        let template_type = if user.platform_id == self.cloud_platform_id {
            TemplateType::Cloud
        } else {
            TemplateType::Platform
        };

        let now = Utc::now();
        let template = Template {
            id: TemplateId::new(),
            platform_id: user.platform_id,
            project_id: input.project_id.or(user.project.map(|p| p.project_id)),
            template_type,
            name: input.name,
            description: input.description,
            tags: input.tags,
            created: now,
            updated: now,
        };

        self.templates.insert(template.clone())?;
        self.record(user, AuditAction::FlowTemplateCreated, &template)?;
        tracing::info!(
            principal = %principal,
            template_id = %template.id,
            template_type = ?template.template_type,
            "flow template created"
        );
        Ok(template)
    }

    /// Audit events of the caller's platform, newest first.
    pub fn list_audit_events(
        &self,
        principal: &Principal,
        page: PageRequest,
    ) -> Result<SeekPage<AuditEvent>, TemplateError> {
        let Some(platform_id) = principal.platform_id() else {
            return Err(self.deny(principal, None, DenyReason::Anonymous));
        };
        authorize(principal, platform_id, &audit_log::READ, &self.permissions)
            .map_err(|e| self.deny(principal, None, e.into()))?;

        let mut events = self.audit.list(platform_id)?;
        events.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| b.id.cmp(&a.id)));
        Ok(SeekPage::paginate(events, page))
    }

    /// Template-write rights on the principal's own platform, with the
    /// platform's feature flag on. Does not look at any template.
    fn authorize_manage<'a>(
        &self,
        principal: &'a Principal,
        template_id: Option<TemplateId>,
    ) -> Result<&'a UserPrincipal, TemplateError> {
        let Some(platform_id) = principal.platform_id() else {
            return Err(self.deny(principal, template_id, DenyReason::Anonymous));
        };

        let user = authorize(principal, platform_id, &flow_templates::WRITE, &self.permissions)
            .map_err(|e| self.deny(principal, template_id, e.into()))?;

        if !self.templates_enabled(platform_id)? {
            return Err(self.deny(principal, template_id, DenyReason::FeatureDisabled));
        }
        Ok(user)
    }

    fn templates_enabled(&self, platform_id: PlatformId) -> Result<bool, StoreError> {
        Ok(self
            .platforms
            .get(platform_id)?
            .is_some_and(|p| p.manage_templates_enabled))
    }

    fn deny(&self, principal: &Principal, template_id: Option<TemplateId>, reason: DenyReason) -> TemplateError {
        tracing::debug!(
            principal = %principal,
            template_id = ?template_id.map(|id| id.to_string()),
            reason = reason.label(),
            "template access denied"
        );
        TemplateError::Forbidden(reason)
    }

    fn record(&self, user: &UserPrincipal, action: AuditAction, template: &Template) -> Result<(), StoreError> {
        self.audit.append(AuditEvent {
            id: AuditEventId::new(),
            platform_id: template.platform_id,
            user_id: user.user_id,
            action,
            resource_id: template.id,
            resource_name: template.name.clone(),
            created: Utc::now(),
        })
    }
}
