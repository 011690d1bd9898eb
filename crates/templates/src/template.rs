use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flowdeck_core::{DomainError, DomainResult, PlatformId, ProjectId, TemplateId};

/// Visibility scope of a template.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateType {
    /// Visible only inside the owning platform.
    Platform,
    /// Visible to everyone, including anonymous callers.
    Cloud,
}

/// A flow template. Scope (`platform_id`, `template_type`) never changes
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub platform_id: PlatformId,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Template {
    pub fn is_cloud(&self) -> bool {
        self.template_type == TemplateType::Cloud
    }

    /// Visible to every caller: `CLOUD` templates and anything owned by the
    /// reserved cloud platform, whatever its type.
    pub fn is_public(&self, cloud_platform_id: PlatformId) -> bool {
        self.is_cloud() || self.platform_id == cloud_platform_id
    }

    /// Case-insensitive substring match on name or description.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    pub fn has_all_tags(&self, tags: &[String]) -> bool {
        tags.iter().all(|t| self.tags.iter().any(|own| own == t))
    }
}

/// Input for creating a template. Scope is decided by the authority.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
}

impl NewTemplate {
    /// Trim fields and drop blank or repeated tags.
    pub fn normalized(self) -> DomainResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags {
            let tag = tag.trim().to_string();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Ok(Self {
            name,
            description: self.description.trim().to_string(),
            tags,
            project_id: self.project_id,
        })
    }
}
