//! `flowdeck-auth` — pure authentication/authorization boundary.
//!
//! This crate is decoupled from HTTP and storage: callers resolve a
//! [`Principal`] from verified claims and ask [`authorize`] for decisions
//! against an explicit [`RolePermissions`] table.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod permissions;
pub mod policy;
pub mod principal;
pub mod roles;

pub use authorize::{authorize, AuthzError};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{encode_hs256, Hs256JwtValidator, JwtError, JwtValidator};
pub use permissions::Permission;
pub use policy::RolePermissions;
pub use principal::{Principal, ProjectMembership, UserPrincipal};
pub use roles::{PlatformRole, ProjectRole};
