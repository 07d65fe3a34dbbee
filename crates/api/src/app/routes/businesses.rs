use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockledger_core::BusinessId;
use stockledger_reporting::Dashboard;
use stockledger_store::BusinessSelection;
use stockledger_tenancy::{BusinessPatch, NewBusiness};

use crate::app::{dto, errors, AppServices};
use crate::app::routes::{products, transactions};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_businesses).post(create_business))
        .route("/current", get(current_business))
        .route(
            "/:id",
            get(get_business)
                .put(update_business)
                .patch(update_business)
                .delete(delete_business),
        )
        .route("/:id/dashboard", get(dashboard))
        .nest("/:id/products", products::router())
        .nest("/:id/transactions", transactions::router())
}

pub(crate) fn parse_business_id(id: &str) -> Result<BusinessId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid business id")
    })
}

pub async fn create_business(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateBusinessRequest>,
) -> axum::response::Response {
    let new_business = match NewBusiness::new(body.name, body.address) {
        Ok(b) => b,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().create_business(principal.principal_id(), new_business) {
        Ok(business) => {
            (StatusCode::CREATED, Json(dto::business_to_json(&business))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_businesses(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let businesses = services.store().list_businesses(principal.principal_id());
    let body: Vec<_> = businesses.iter().map(dto::business_to_json).collect();
    Json(body).into_response()
}

pub async fn get_business(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_business_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.store().get_business(principal.principal_id(), id) {
        Ok(business) => Json(dto::business_to_json(&business)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Edit a business (PUT and PATCH). A rename goes through the same global
/// name-uniqueness check as creation, excluding the business itself.
pub async fn update_business(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateBusinessRequest>,
) -> axum::response::Response {
    let id = match parse_business_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let patch = match BusinessPatch::new(body.name, body.address) {
        Ok(patch) => patch,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .store()
        .update_business(principal.principal_id(), id, patch)
    {
        Ok(business) => Json(dto::business_to_json(&business)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_business(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_business_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.store().delete_business(principal.principal_id(), id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Resolve the caller's current business from an explicit, caller-remembered
/// selection. A stale selection falls back to the first owned business; a
/// caller with no businesses gets a distinct signal to start the creation
/// flow.
pub async fn current_business(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Query(query): Query<dto::CurrentBusinessQuery>,
) -> axum::response::Response {
    // A malformed selection is treated like a stale one.
    let selected = query.selected.as_deref().and_then(|s| s.parse().ok());

    match services
        .store()
        .resolve_current_business(principal.principal_id(), selected)
    {
        BusinessSelection::Selected(business) => {
            Json(dto::business_to_json(&business)).into_response()
        }
        BusinessSelection::NoBusiness => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "no_business" })),
        )
            .into_response(),
    }
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_business_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let (products, transactions) =
        match services.store().snapshot(principal.principal_id(), id) {
            Ok(snapshot) => snapshot,
            Err(e) => return errors::domain_error_to_response(e),
        };

    let dashboard = Dashboard::compute(&products, &transactions);
    let recent: Vec<_> = dashboard
        .recent_transactions
        .iter()
        .map(|t| {
            let name = products
                .iter()
                .find(|p| p.id() == t.product_id())
                .map(|p| p.name());
            dto::transaction_to_json(t, name)
        })
        .collect();

    Json(serde_json::json!({
        "total_products": dashboard.total_products,
        "low_stock_count": dashboard.low_stock_count,
        "total_stock_value": dashboard.total_stock_value,
        "recent_transactions": recent,
    }))
    .into_response()
}
