use serde::{Deserialize, Serialize};

use stockledger_core::{BusinessId, DomainError, DomainResult, Entity, ProductId, MAX_QUANTITY};

const MAX_FIELD_LEN: usize = 100;

/// A catalog item tracked by SKU within one business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    business_id: BusinessId,
    name: String,
    sku: String,
    category: String,
    current_quantity: u64,
    reorder_level: u64,
    unit: String,
    supplier_name: Option<String>,
}

impl Product {
    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn business_id(&self) -> BusinessId {
        self.business_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn current_quantity(&self) -> u64 {
        self.current_quantity
    }

    pub fn reorder_level(&self) -> u64 {
        self.reorder_level
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn supplier_name(&self) -> Option<&str> {
        self.supplier_name.as_deref()
    }

    /// A product is low-stock at or below its reorder level.
    pub fn is_low_stock(&self) -> bool {
        self.current_quantity <= self.reorder_level
    }

    pub fn matches(&self, filter: &ProductFilter) -> bool {
        filter.matches(self)
    }

    /// Ledger-only quantity mutation. Callers outside the ledger commit path
    /// go through [`ProductPatch`] instead.
    pub fn set_quantity(&mut self, quantity: u64) {
        self.current_quantity = quantity;
    }

    /// Apply a manual correction. Full-field edit; may override the cached
    /// quantity directly, bypassing the ledger (known reconciliation gap).
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(sku) = patch.sku {
            self.sku = sku;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(quantity) = patch.current_quantity {
            self.current_quantity = quantity;
        }
        if let Some(level) = patch.reorder_level {
            self.reorder_level = level;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(supplier) = patch.supplier_name {
            self.supplier_name = supplier;
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

fn validate_sku(sku: &str) -> DomainResult<()> {
    if sku.is_empty() {
        return Err(DomainError::validation("sku", "SKU cannot be empty"));
    }
    if sku.len() > MAX_FIELD_LEN {
        return Err(DomainError::validation("sku", "SKU exceeds 100 characters"));
    }
    if !sku.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::validation(
            "sku",
            "only letters and numbers allowed",
        ));
    }
    Ok(())
}

fn validate_text(field: &'static str, value: &str, required: bool) -> DomainResult<()> {
    if required && value.trim().is_empty() {
        return Err(DomainError::validation(field, format!("{field} cannot be empty")));
    }
    if value.len() > MAX_FIELD_LEN {
        return Err(DomainError::validation(
            field,
            format!("{field} exceeds 100 characters"),
        ));
    }
    Ok(())
}

fn validate_quantity(field: &'static str, value: u64) -> DomainResult<()> {
    if value > MAX_QUANTITY {
        return Err(DomainError::validation(
            field,
            format!("{field} exceeds the maximum of {MAX_QUANTITY}"),
        ));
    }
    Ok(())
}

/// Validated input for creating a product.
///
/// `current_quantity` here is the opening balance: it is set directly on the
/// record and is deliberately not run through the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    sku: String,
    category: String,
    current_quantity: u64,
    reorder_level: u64,
    unit: String,
    supplier_name: Option<String>,
}

impl ProductDraft {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        category: impl Into<String>,
        current_quantity: u64,
        reorder_level: u64,
        unit: impl Into<String>,
        supplier_name: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let sku = sku.into();
        let category = category.into();
        let unit = unit.into();

        validate_text("name", &name, true)?;
        validate_sku(&sku)?;
        validate_text("category", &category, false)?;
        validate_quantity("current_quantity", current_quantity)?;
        validate_quantity("reorder_level", reorder_level)?;
        validate_text("unit", &unit, false)?;
        if let Some(supplier) = supplier_name.as_deref() {
            validate_text("supplier_name", supplier, false)?;
        }

        Ok(Self {
            name,
            sku,
            category,
            current_quantity,
            reorder_level,
            unit,
            supplier_name: supplier_name.filter(|s| !s.is_empty()),
        })
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn into_product(self, business_id: BusinessId) -> Product {
        Product {
            id: ProductId::new(),
            business_id,
            name: self.name,
            sku: self.sku,
            category: self.category,
            current_quantity: self.current_quantity,
            reorder_level: self.reorder_level,
            unit: self.unit,
            supplier_name: self.supplier_name,
        }
    }
}

/// Validated input for editing a product. `None` leaves a field unchanged;
/// `Some(None)` for `supplier_name` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    name: Option<String>,
    sku: Option<String>,
    category: Option<String>,
    current_quantity: Option<u64>,
    reorder_level: Option<u64>,
    unit: Option<String>,
    supplier_name: Option<Option<String>>,
}

impl ProductPatch {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: Option<String>,
        sku: Option<String>,
        category: Option<String>,
        current_quantity: Option<u64>,
        reorder_level: Option<u64>,
        unit: Option<String>,
        supplier_name: Option<Option<String>>,
    ) -> DomainResult<Self> {
        if let Some(name) = name.as_deref() {
            validate_text("name", name, true)?;
        }
        if let Some(sku) = sku.as_deref() {
            validate_sku(sku)?;
        }
        if let Some(category) = category.as_deref() {
            validate_text("category", category, false)?;
        }
        if let Some(quantity) = current_quantity {
            validate_quantity("current_quantity", quantity)?;
        }
        if let Some(level) = reorder_level {
            validate_quantity("reorder_level", level)?;
        }
        if let Some(unit) = unit.as_deref() {
            validate_text("unit", unit, false)?;
        }
        if let Some(Some(supplier)) = supplier_name.as_ref().map(|s| s.as_deref()) {
            validate_text("supplier_name", supplier, false)?;
        }

        Ok(Self {
            name,
            sku,
            category,
            current_quantity,
            reorder_level,
            unit,
            supplier_name,
        })
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn overrides_quantity(&self) -> bool {
        self.current_quantity.is_some()
    }
}

/// Listing filter. `search` matches case-insensitively against name, SKU, or
/// supplier name (union); `category` is an exact match. Both compose with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.category.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(search) = self.search.as_deref() {
            let needle = search.to_lowercase();
            let hit = product.name.to_lowercase().contains(&needle)
                || product.sku.to_lowercase().contains(&needle)
                || product
                    .supplier_name
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(category) = self.category.as_deref() {
            if product.category != category {
                return false;
            }
        }

        true
    }
}
