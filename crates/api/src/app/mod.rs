//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: stores and the template authority
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: query/request DTOs and mapping to domain types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(jwt_secret: String, services: AppServices) -> Router {
    let jwt = Arc::new(flowdeck_auth::Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let auth_state = middleware::AuthState { jwt };

    // Versioned routes: principal resolved per request (anonymous allowed).
    let v1 = routes::router()
        .layer(Extension(Arc::new(services)))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/v1", v1)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
