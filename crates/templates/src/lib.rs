//! `flowdeck-templates` — flow template visibility and access rules.
//!
//! If you're new to this crate, it is structured like:
//! - `template.rs`, `platform.rs`, `audit.rs`: plain data types
//! - `store.rs`: store traits plus in-memory implementations
//! - `page.rs`: cursor paging shared by list endpoints
//! - `authority.rs`: every list/get/create/delete decision

pub mod audit;
pub mod authority;
pub mod page;
pub mod platform;
pub mod store;
pub mod template;

pub use audit::{AuditAction, AuditEvent};
pub use authority::{AccessDecision, DenyReason, TemplateAuthority, TemplateError, TemplateQuery};
pub use page::{Cursor, PageRequest, SeekPage};
pub use platform::Platform;
pub use store::{
    AuditLog, InMemoryAuditLog, InMemoryPlatformStore, InMemoryTemplateStore, PlatformStore,
    StoreError, TemplateStore,
};
pub use template::{NewTemplate, Template, TemplateType};
