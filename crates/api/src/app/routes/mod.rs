use axum::Router;

pub mod audit_events;
pub mod flow_templates;
pub mod system;

/// Router for all `/v1` endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/flow-templates", flow_templates::router())
        .nest("/audit-events", audit_events::router())
}
