use serde::Deserialize;
use serde_json::json;

use stockledger_catalog::Product;
use stockledger_ledger::StockTransaction;
use stockledger_tenancy::Business;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateBusinessRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// PUT and PATCH share this shape: absent fields stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateBusinessRequest {
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub current_quantity: u64,
    #[serde(default)]
    pub reorder_level: u64,
    #[serde(default)]
    pub unit: String,
    pub supplier_name: Option<String>,
}

/// PUT and PATCH share this shape: absent fields stay unchanged, so a full
/// PUT body and a partial PATCH body go through the same path. An empty
/// `supplier_name` clears the supplier.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub current_quantity: Option<u64>,
    pub reorder_level: Option<u64>,
    pub unit: Option<String>,
    pub supplier_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Product id, as the original clients send it.
    pub product: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub quantity: u64,
}

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentBusinessQuery {
    /// The caller's remembered selection, if any.
    pub selected: Option<String>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn business_to_json(business: &Business) -> serde_json::Value {
    json!({
        "id": business.id().to_string(),
        "name": business.name(),
        "address": business.address(),
        "owner": business.owner().to_string(),
        "created_at": business.created_at(),
    })
}

pub fn product_to_json(product: &Product) -> serde_json::Value {
    json!({
        "id": product.id().to_string(),
        "business": product.business_id().to_string(),
        "name": product.name(),
        "sku": product.sku(),
        "category": product.category(),
        "current_quantity": product.current_quantity(),
        "reorder_level": product.reorder_level(),
        "unit": product.unit(),
        "supplier_name": product.supplier_name(),
    })
}

pub fn transaction_to_json(
    transaction: &StockTransaction,
    product_name: Option<&str>,
) -> serde_json::Value {
    json!({
        "id": transaction.id().to_string(),
        "product": transaction.product_id().to_string(),
        "product_name": product_name,
        "business": transaction.business_id().to_string(),
        "type": transaction.transaction_type().as_str(),
        "quantity": transaction.quantity(),
        "created_at": transaction.created_at(),
    })
}
