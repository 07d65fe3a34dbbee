use serde::Serialize;

use stockledger_catalog::Product;
use stockledger_ledger::StockTransaction;

/// How many ledger entries the dashboard shows.
const RECENT_TRANSACTIONS: usize = 10;

/// Aggregate metrics for one business.
///
/// `total_stock_value` is a unit count (the sum of all product quantities),
/// not a monetary value; the name is kept for continuity with the clients
/// consuming it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub total_products: usize,
    pub low_stock_count: usize,
    pub total_stock_value: u64,
    pub recent_transactions: Vec<StockTransaction>,
}

impl Dashboard {
    /// Compute the dashboard from a snapshot. `transactions` must already be
    /// ordered newest first, as the store's snapshot returns them.
    pub fn compute(products: &[Product], transactions: &[StockTransaction]) -> Self {
        Self {
            total_products: products.len(),
            low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
            total_stock_value: products.iter().map(Product::current_quantity).sum(),
            recent_transactions: transactions
                .iter()
                .take(RECENT_TRANSACTIONS)
                .cloned()
                .collect(),
        }
    }
}
