use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockledger_core::DomainError;

/// Map a domain failure onto the wire. Validation-class failures come back
/// as `{field: [message]}` so clients can attach them to the offending form
/// field; `NotFound` deliberately covers both absent and foreign-owned
/// records.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation { field, message } => field_error(field, message),
        DomainError::DuplicateName => field_error("name", "a business with this name already exists"),
        DomainError::DuplicateSku => {
            field_error("sku", "a product with this SKU already exists in this business")
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::InsufficientStock { available } => field_error(
            "quantity",
            format!("Insufficient stock. Current quantity is {available}."),
        ),
        DomainError::Unauthenticated => json_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "invalid credentials",
        ),
    }
}

/// Field-scoped validation error, 400 with `{field: [message]}`.
pub fn field_error(field: &str, message: impl Into<String>) -> axum::response::Response {
    let mut body = serde_json::Map::new();
    body.insert(field.to_string(), json!([message.into()]));
    (
        StatusCode::BAD_REQUEST,
        axum::Json(serde_json::Value::Object(body)),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
