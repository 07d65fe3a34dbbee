use axum::{routing::get, Router};

pub mod auth;
pub mod businesses;
pub mod products;
pub mod system;
pub mod transactions;

/// Router for all authenticated (owner-scoped) endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/businesses", businesses::router())
}
