use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flowdeck_core::{AuditEventId, PlatformId, TemplateId, UserId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    FlowTemplateCreated,
    FlowTemplateDeleted,
}

/// A record of a successful template mutation, scoped to one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: AuditEventId,
    pub platform_id: PlatformId,
    pub user_id: UserId,
    pub action: AuditAction,
    pub resource_id: TemplateId,
    pub resource_name: String,
    pub created: DateTime<Utc>,
}
