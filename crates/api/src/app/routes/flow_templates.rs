use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use flowdeck_core::TemplateId;
use flowdeck_templates::NewTemplate;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_templates).post(create_template))
        .route("/:id", get(get_template).delete(delete_template))
}

pub async fn list_templates(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    query: Result<Query<dto::ListTemplatesQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let query = match query.into_query() {
        Ok(q) => q,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.authority().list(principal.principal(), &query) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => errors::template_error_to_response(e),
    }
}

pub async fn get_template(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TemplateId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid template id"),
    };

    match services.authority().get(principal.principal(), id) {
        Ok(template) => (StatusCode::OK, Json(template)).into_response(),
        Err(e) => errors::template_error_to_response(e),
    }
}

pub async fn create_template(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<NewTemplate>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.authority().create(principal.principal(), body) {
        Ok(template) => (StatusCode::CREATED, Json(template)).into_response(),
        Err(e) => errors::template_error_to_response(e),
    }
}

pub async fn delete_template(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TemplateId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid template id"),
    };

    match services.authority().delete(principal.principal(), id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::template_error_to_response(e),
    }
}
