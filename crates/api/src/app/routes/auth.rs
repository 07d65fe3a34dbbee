//! Unauthenticated routes: registration and credential exchange.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use stockledger_auth::Registration;

use crate::app::{dto, errors};
use crate::app::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(token))
        .route("/token/refresh", post(token_refresh))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    let registration = match Registration::new(
        body.username,
        body.email,
        body.first_name,
        body.last_name,
        body.password,
    ) {
        Ok(r) => r,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.users().register(registration) {
        // `User` serializes without any password material.
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn token(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::TokenRequest>,
) -> axum::response::Response {
    let principal = match services.users().verify_credentials(&body.username, &body.password) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.tokens().issue_pair(principal) {
        Ok(pair) => Json(serde_json::json!({
            "access": pair.access,
            "refresh": pair.refresh,
        }))
        .into_response(),
        Err(e) => errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "token_error", e.to_string()),
    }
}

pub async fn token_refresh(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::TokenRefreshRequest>,
) -> axum::response::Response {
    match services.tokens().refresh(&body.refresh) {
        Ok(access) => Json(serde_json::json!({ "access": access })).into_response(),
        Err(_) => errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "invalid or expired refresh token",
        ),
    }
}
