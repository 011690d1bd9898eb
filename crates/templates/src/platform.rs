use serde::{Deserialize, Serialize};

use flowdeck_core::{PlatformId, UserId};

/// A tenant. Exactly one platform id is reserved for cloud-wide templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    /// Feature flag gating template creation and deletion.
    #[serde(default)]
    pub manage_templates_enabled: bool,
}
