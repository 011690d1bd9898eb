//! Audit trail of template mutations, readable by platform owners and admins.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/", get(list_audit_events))
}

pub async fn list_audit_events(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    query: Result<Query<dto::PageQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let page = match query.page_request() {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.authority().list_audit_events(principal.principal(), page) {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(e) => errors::template_error_to_response(e),
    }
}
