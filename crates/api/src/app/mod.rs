//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use stockledger_auth::{TokenService, UserRegistry};
use stockledger_store::InventoryStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared service handles: the inventory store, the user registry, and the
/// token service. One instance per process, injected as an `Extension`.
pub struct AppServices {
    store: InventoryStore,
    users: UserRegistry,
    tokens: TokenService,
}

impl AppServices {
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            store: InventoryStore::new(),
            users: UserRegistry::new(),
            tokens: TokenService::new(jwt_secret),
        }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(jwt_secret: String) -> Router {
    let services = Arc::new(AppServices::new(jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState {
        services: Arc::clone(&services),
    };

    // Protected routes: require a valid access token.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/auth", routes::auth::router())
        .merge(protected)
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
