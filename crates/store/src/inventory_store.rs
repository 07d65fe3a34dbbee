use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;

use stockledger_catalog::{Product, ProductDraft, ProductFilter, ProductPatch};
use stockledger_core::{BusinessId, DomainError, DomainResult, PrincipalId, ProductId};
use stockledger_ledger::{apply_movement, NewTransaction, StockTransaction, TransactionType};
use stockledger_tenancy::{Business, BusinessPatch, NewBusiness};

/// All records, guarded together so that readers always observe a consistent
/// snapshot: a transaction never exists without its quantity adjustment, and
/// cascade deletes remove a whole ownership subtree in one step.
#[derive(Debug, Default)]
struct State {
    businesses: HashMap<BusinessId, Business>,
    products: HashMap<ProductId, Product>,
    /// Append-only, in insertion order.
    transactions: Vec<StockTransaction>,
}

impl State {
    fn business_owned(&self, owner: PrincipalId, id: BusinessId) -> DomainResult<&Business> {
        self.businesses
            .get(&id)
            .filter(|b| b.is_owned_by(owner))
            .ok_or(DomainError::NotFound)
    }

    fn product_in_business(
        &self,
        business_id: BusinessId,
        id: ProductId,
    ) -> DomainResult<&Product> {
        self.products
            .get(&id)
            .filter(|p| p.business_id() == business_id)
            .ok_or(DomainError::NotFound)
    }

    fn sku_taken(&self, business_id: BusinessId, sku: &str, except: Option<ProductId>) -> bool {
        self.products.values().any(|p| {
            p.business_id() == business_id && p.sku() == sku && Some(p.id()) != except
        })
    }
}

/// In-memory tenant-isolated store. Cheap to clone handles via `Arc`.
#[derive(Debug, Default)]
pub struct InventoryStore {
    state: RwLock<State>,
    /// Row locks for the ledger commit path, keyed by product. Entries are
    /// created lazily and removed when the product is deleted.
    commit_locks: Mutex<HashMap<ProductId, Arc<Mutex<()>>>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn commit_lock(&self, product_id: ProductId) -> Arc<Mutex<()>> {
        let mut locks = self.commit_locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(product_id).or_default().clone()
    }

    fn drop_commit_locks(&self, product_ids: &[ProductId]) {
        let mut locks = self.commit_locks.lock().unwrap_or_else(|e| e.into_inner());
        for id in product_ids {
            locks.remove(id);
        }
    }

    // ── Tenancy ─────────────────────────────────────────────────────────

    /// Create a business under `owner`. Names are globally unique.
    pub fn create_business(
        &self,
        owner: PrincipalId,
        new_business: NewBusiness,
    ) -> DomainResult<Business> {
        let mut state = self.write();

        if state.businesses.values().any(|b| b.name() == new_business.name()) {
            return Err(DomainError::DuplicateName);
        }

        let business = new_business.into_business(owner, Utc::now());
        tracing::info!(business_id = %business.id(), name = business.name(), "business created");
        state.businesses.insert(business.id(), business.clone());
        Ok(business)
    }

    /// All businesses owned by `owner`, in creation order.
    pub fn list_businesses(&self, owner: PrincipalId) -> Vec<Business> {
        let state = self.read();
        let mut businesses: Vec<Business> = state
            .businesses
            .values()
            .filter(|b| b.is_owned_by(owner))
            .cloned()
            .collect();
        businesses.sort_by_key(|b| (b.created_at(), *b.id().as_uuid()));
        businesses
    }

    /// Scoped lookup: an id owned by another principal reports `NotFound`,
    /// indistinguishable from an id that does not exist.
    pub fn get_business(&self, owner: PrincipalId, id: BusinessId) -> DomainResult<Business> {
        self.read().business_owned(owner, id).cloned()
    }

    /// Edit a business. A rename re-checks global name uniqueness, excluding
    /// the business itself.
    pub fn update_business(
        &self,
        owner: PrincipalId,
        id: BusinessId,
        patch: BusinessPatch,
    ) -> DomainResult<Business> {
        let mut state = self.write();
        state.business_owned(owner, id)?;

        if let Some(name) = patch.name() {
            if state.businesses.values().any(|b| b.id() != id && b.name() == name) {
                return Err(DomainError::DuplicateName);
            }
        }

        let business = state
            .businesses
            .get_mut(&id)
            .ok_or(DomainError::NotFound)?;
        business.apply_patch(patch);
        Ok(business.clone())
    }

    /// Delete a business and, within the same state mutation, every product
    /// and transaction under it.
    pub fn delete_business(&self, owner: PrincipalId, id: BusinessId) -> DomainResult<()> {
        let removed_products = {
            let mut state = self.write();
            state.business_owned(owner, id)?;

            state.businesses.remove(&id);
            let removed: Vec<ProductId> = state
                .products
                .values()
                .filter(|p| p.business_id() == id)
                .map(|p| p.id())
                .collect();
            state.products.retain(|_, p| p.business_id() != id);
            state.transactions.retain(|t| t.business_id() != id);
            removed
        };

        self.drop_commit_locks(&removed_products);
        tracing::info!(business_id = %id, products = removed_products.len(), "business deleted");
        Ok(())
    }

    // ── Catalog ─────────────────────────────────────────────────────────

    /// Create a product. The draft's quantity is an opening balance set
    /// directly on the record, not recorded in the ledger.
    pub fn create_product(
        &self,
        owner: PrincipalId,
        business_id: BusinessId,
        draft: ProductDraft,
    ) -> DomainResult<Product> {
        let mut state = self.write();
        state.business_owned(owner, business_id)?;

        if state.sku_taken(business_id, draft.sku(), None) {
            return Err(DomainError::DuplicateSku);
        }

        let product = draft.into_product(business_id);
        tracing::info!(product_id = %product.id(), sku = product.sku(), "product created");
        state.products.insert(product.id(), product.clone());
        Ok(product)
    }

    pub fn get_product(
        &self,
        owner: PrincipalId,
        business_id: BusinessId,
        product_id: ProductId,
    ) -> DomainResult<Product> {
        let state = self.read();
        state.business_owned(owner, business_id)?;
        state.product_in_business(business_id, product_id).cloned()
    }

    /// Manual-correction edit. May rewrite any field, including a direct
    /// quantity override that bypasses the ledger.
    pub fn update_product(
        &self,
        owner: PrincipalId,
        business_id: BusinessId,
        product_id: ProductId,
        patch: ProductPatch,
    ) -> DomainResult<Product> {
        let mut state = self.write();
        state.business_owned(owner, business_id)?;
        state.product_in_business(business_id, product_id)?;

        if let Some(sku) = patch.sku() {
            if state.sku_taken(business_id, sku, Some(product_id)) {
                return Err(DomainError::DuplicateSku);
            }
        }

        if patch.overrides_quantity() {
            tracing::warn!(product_id = %product_id, "manual quantity override, ledger drift possible");
        }

        let product = state
            .products
            .get_mut(&product_id)
            .ok_or(DomainError::NotFound)?;
        product.apply_patch(patch);
        Ok(product.clone())
    }

    /// Delete a product and its transactions in one state mutation.
    pub fn delete_product(
        &self,
        owner: PrincipalId,
        business_id: BusinessId,
        product_id: ProductId,
    ) -> DomainResult<()> {
        {
            let mut state = self.write();
            state.business_owned(owner, business_id)?;
            state.product_in_business(business_id, product_id)?;

            state.products.remove(&product_id);
            state.transactions.retain(|t| t.product_id() != product_id);
        }

        self.drop_commit_locks(&[product_id]);
        tracing::info!(product_id = %product_id, "product deleted");
        Ok(())
    }

    pub fn list_products(
        &self,
        owner: PrincipalId,
        business_id: BusinessId,
        filter: &ProductFilter,
    ) -> DomainResult<Vec<Product>> {
        let state = self.read();
        state.business_owned(owner, business_id)?;

        let mut products: Vec<Product> = state
            .products
            .values()
            .filter(|p| p.business_id() == business_id && p.matches(filter))
            .cloned()
            .collect();
        products.sort_by_key(|p| *p.id().as_uuid());
        Ok(products)
    }

    /// Every product at or below its reorder level.
    pub fn low_stock_products(
        &self,
        owner: PrincipalId,
        business_id: BusinessId,
    ) -> DomainResult<Vec<Product>> {
        let state = self.read();
        state.business_owned(owner, business_id)?;

        let mut products: Vec<Product> = state
            .products
            .values()
            .filter(|p| p.business_id() == business_id && p.is_low_stock())
            .cloned()
            .collect();
        products.sort_by_key(|p| *p.id().as_uuid());
        Ok(products)
    }

    // ── Ledger ──────────────────────────────────────────────────────────

    /// Record a stock movement and adjust the product quantity atomically.
    ///
    /// The row lock serializes the read-check-write window per product, so
    /// two concurrent outbound requests cannot both observe sufficient stock
    /// and jointly overdraw it. Movements against different products take
    /// different row locks and only meet at the brief snapshot-commit write.
    /// Every exit path releases both locks by guard drop; a rejected movement
    /// mutates nothing.
    pub fn record_transaction(
        &self,
        owner: PrincipalId,
        business_id: BusinessId,
        new_transaction: NewTransaction,
    ) -> DomainResult<StockTransaction> {
        let product_id = new_transaction.product_id();
        let row_lock = self.commit_lock(product_id);
        let _row = row_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut state = self.write();
        state.business_owned(owner, business_id)?;
        let product = state.product_in_business(business_id, product_id)?;

        let new_quantity = apply_movement(
            product.current_quantity(),
            new_transaction.transaction_type(),
            new_transaction.quantity(),
        )?;

        let transaction = new_transaction.into_transaction(business_id, Utc::now());
        tracing::info!(
            transaction_id = %transaction.id(),
            product_id = %product_id,
            transaction_type = %transaction.transaction_type(),
            quantity = transaction.quantity(),
            new_quantity,
            "transaction recorded"
        );

        // Single mutation block: ledger append + quantity adjustment are
        // observed together or not at all.
        state.transactions.push(transaction.clone());
        if let Some(product) = state.products.get_mut(&product_id) {
            product.set_quantity(new_quantity);
        }

        Ok(transaction)
    }

    /// Transactions of a business, newest first. Same-instant entries keep
    /// insertion order.
    pub fn list_transactions(
        &self,
        owner: PrincipalId,
        business_id: BusinessId,
        type_filter: Option<TransactionType>,
    ) -> DomainResult<Vec<StockTransaction>> {
        let state = self.read();
        state.business_owned(owner, business_id)?;

        let mut transactions: Vec<StockTransaction> = state
            .transactions
            .iter()
            .filter(|t| {
                t.business_id() == business_id
                    && type_filter.is_none_or(|f| t.transaction_type() == f)
            })
            .cloned()
            .collect();
        // Stable sort: descending recency, ties stay in insertion order.
        transactions.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(transactions)
    }

    /// One consistent snapshot of a business's catalog and ledger, for the
    /// read-side reporting view.
    pub fn snapshot(
        &self,
        owner: PrincipalId,
        business_id: BusinessId,
    ) -> DomainResult<(Vec<Product>, Vec<StockTransaction>)> {
        let state = self.read();
        state.business_owned(owner, business_id)?;

        let products = state
            .products
            .values()
            .filter(|p| p.business_id() == business_id)
            .cloned()
            .collect();
        let mut transactions: Vec<StockTransaction> = state
            .transactions
            .iter()
            .filter(|t| t.business_id() == business_id)
            .cloned()
            .collect();
        transactions.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok((products, transactions))
    }
}
