use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockledger_catalog::{ProductDraft, ProductFilter, ProductPatch};
use stockledger_core::ProductId;

use crate::app::routes::businesses::parse_business_id;
use crate::app::{dto, errors, AppServices};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/low-stock", get(low_stock_products))
        .route(
            "/:pid",
            get(get_product)
                .put(update_product)
                .patch(update_product)
                .delete(delete_product),
        )
}

fn parse_product_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
    })
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let business_id = match parse_business_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let draft = match ProductDraft::new(
        body.name,
        body.sku,
        body.category,
        body.current_quantity,
        body.reorder_level,
        body.unit,
        body.supplier_name,
    ) {
        Ok(draft) => draft,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .store()
        .create_product(principal.principal_id(), business_id, draft)
    {
        Ok(product) => {
            (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Query(query): Query<dto::ListProductsQuery>,
) -> axum::response::Response {
    let business_id = match parse_business_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let filter = ProductFilter {
        search: query.search,
        category: query.category,
    };

    match services
        .store()
        .list_products(principal.principal_id(), business_id, &filter)
    {
        Ok(products) => {
            let body: Vec<_> = products.iter().map(dto::product_to_json).collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn low_stock_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let business_id = match parse_business_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .store()
        .low_stock_products(principal.principal_id(), business_id)
    {
        Ok(products) => {
            let body: Vec<_> = products.iter().map(dto::product_to_json).collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path((id, pid)): Path<(String, String)>,
) -> axum::response::Response {
    let business_id = match parse_business_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let product_id = match parse_product_id(&pid) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .store()
        .get_product(principal.principal_id(), business_id, product_id)
    {
        Ok(product) => Json(dto::product_to_json(&product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Manual-correction edit (PUT and PATCH). May override the cached quantity
/// directly; that path deliberately bypasses the ledger.
pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path((id, pid)): Path<(String, String)>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    let business_id = match parse_business_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let product_id = match parse_product_id(&pid) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    // Empty supplier string clears the supplier.
    let supplier = body
        .supplier_name
        .map(|s| if s.is_empty() { None } else { Some(s) });

    let patch = match ProductPatch::new(
        body.name,
        body.sku,
        body.category,
        body.current_quantity,
        body.reorder_level,
        body.unit,
        supplier,
    ) {
        Ok(patch) => patch,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .store()
        .update_product(principal.principal_id(), business_id, product_id, patch)
    {
        Ok(product) => Json(dto::product_to_json(&product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path((id, pid)): Path<(String, String)>,
) -> axum::response::Response {
    let business_id = match parse_business_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let product_id = match parse_product_id(&pid) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .store()
        .delete_product(principal.principal_id(), business_id, product_id)
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
