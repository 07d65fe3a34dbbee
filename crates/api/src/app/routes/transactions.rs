//! Ledger routes. Only GET and POST exist on this resource: the ledger is
//! append-only, and immutability is enforced at the router as well as in
//! the store.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockledger_core::ProductId;
use stockledger_ledger::{NewTransaction, TransactionType};

use crate::app::routes::businesses::parse_business_id;
use crate::app::{dto, errors, AppServices};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/", get(list_transactions).post(create_transaction))
}

pub async fn create_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreateTransactionRequest>,
) -> axum::response::Response {
    let business_id = match parse_business_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let product_id: ProductId = match body.product.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
        }
    };
    let transaction_type = match TransactionType::parse(&body.transaction_type) {
        Ok(t) => t,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let new_transaction = match NewTransaction::new(product_id, transaction_type, body.quantity) {
        Ok(t) => t,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let owner = principal.principal_id();
    match services
        .store()
        .record_transaction(owner, business_id, new_transaction)
    {
        Ok(transaction) => {
            let product_name = services
                .store()
                .get_product(owner, business_id, product_id)
                .map(|p| p.name().to_string())
                .ok();
            (
                StatusCode::CREATED,
                Json(dto::transaction_to_json(&transaction, product_name.as_deref())),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_transactions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Query(query): Query<dto::ListTransactionsQuery>,
) -> axum::response::Response {
    let business_id = match parse_business_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let type_filter = match query.transaction_type.as_deref() {
        None => None,
        Some(s) => match TransactionType::parse(s) {
            Ok(t) => Some(t),
            Err(e) => return errors::domain_error_to_response(e),
        },
    };

    let owner = principal.principal_id();
    let (products, _) = match services.store().snapshot(owner, business_id) {
        Ok(snapshot) => snapshot,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .store()
        .list_transactions(owner, business_id, type_filter)
    {
        Ok(transactions) => {
            let body: Vec<_> = transactions
                .iter()
                .map(|t| {
                    let name = products
                        .iter()
                        .find(|p| p.id() == t.product_id())
                        .map(|p| p.name());
                    dto::transaction_to_json(t, name)
                })
                .collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
