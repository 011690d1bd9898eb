//! Startup seed data for the in-memory stores.
//!
//! ```json
//! {
//!   "platforms": [{ "id": "…", "name": "Acme", "manage_templates_enabled": true }],
//!   "templates": [{ "id": "…", "platform_id": "…", "type": "PLATFORM", "name": "…",
//!                   "created": "2024-01-01T00:00:00Z", "updated": "2024-01-01T00:00:00Z" }]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use flowdeck_core::TemplateId;
use flowdeck_templates::{Platform, PlatformStore, StoreError, Template, TemplateStore};

use crate::app::AppServices;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed seed data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cloud template {0} must belong to the cloud platform")]
    CloudTemplateOutsideCloud(TemplateId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub templates: Vec<Template>,
}

impl Seed {
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load everything into `services`. Validation runs before any write.
    pub fn apply(self, services: &AppServices) -> Result<(), SeedError> {
        let cloud = services.authority().cloud_platform_id();
        if let Some(t) = self.templates.iter().find(|t| t.is_cloud() && t.platform_id != cloud) {
            return Err(SeedError::CloudTemplateOutsideCloud(t.id));
        }

        let (platforms, templates) = (self.platforms.len(), self.templates.len());
        for platform in self.platforms {
            services.platforms().upsert(platform)?;
        }
        for template in self.templates {
            services.templates().insert(template)?;
        }

        tracing::info!(platforms, templates, "seed data loaded");
        Ok(())
    }
}
