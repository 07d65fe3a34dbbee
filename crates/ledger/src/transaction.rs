use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockledger_core::{
    BusinessId, DomainError, DomainResult, Entity, ProductId, TransactionId, MAX_QUANTITY,
};

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    In,
    Out,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::In => "In",
            TransactionType::Out => "Out",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "In" => Ok(TransactionType::In),
            "Out" => Ok(TransactionType::Out),
            _ => Err(DomainError::validation("type", "type must be 'In' or 'Out'")),
        }
    }
}

impl core::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable ledger entry. No update or delete path exists anywhere in
/// the system; the ledger is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTransaction {
    id: TransactionId,
    product_id: ProductId,
    business_id: BusinessId,
    r#type: TransactionType,
    quantity: u64,
    created_at: DateTime<Utc>,
}

impl StockTransaction {
    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn business_id(&self) -> BusinessId {
        self.business_id
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.r#type
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Net effect of this entry on its product's quantity. Quantities are
    /// capped at [`MAX_QUANTITY`] on input, so the cast cannot truncate.
    pub fn signed_quantity(&self) -> i64 {
        match self.r#type {
            TransactionType::In => self.quantity as i64,
            TransactionType::Out => -(self.quantity as i64),
        }
    }
}

impl Entity for StockTransaction {
    type Id = TransactionId;

    fn id(&self) -> TransactionId {
        self.id
    }
}

/// Validated input for recording a transaction. Quantity must be a positive
/// integer; resolution of the product against the caller's business happens
/// in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    product_id: ProductId,
    r#type: TransactionType,
    quantity: u64,
}

impl NewTransaction {
    pub fn new(product_id: ProductId, r#type: TransactionType, quantity: u64) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation(
                "quantity",
                "quantity must be a positive integer",
            ));
        }
        if quantity > MAX_QUANTITY {
            return Err(DomainError::validation(
                "quantity",
                format!("quantity exceeds the maximum of {MAX_QUANTITY}"),
            ));
        }
        Ok(Self {
            product_id,
            r#type,
            quantity,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.r#type
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Materialize the immutable entry once the movement has been accepted.
    pub fn into_transaction(
        self,
        business_id: BusinessId,
        created_at: DateTime<Utc>,
    ) -> StockTransaction {
        StockTransaction {
            id: TransactionId::new(),
            product_id: self.product_id,
            business_id,
            r#type: self.r#type,
            quantity: self.quantity,
            created_at,
        }
    }
}

/// Compute the quantity resulting from applying a movement to `current`.
///
/// Outbound movements that exceed current stock are rejected with
/// `InsufficientStock` carrying the pre-transaction quantity; inbound
/// movements that would push the quantity past [`MAX_QUANTITY`] are rejected
/// as a validation error. The caller must leave all state untouched in
/// either case.
pub fn apply_movement(
    current: u64,
    r#type: TransactionType,
    quantity: u64,
) -> DomainResult<u64> {
    match r#type {
        TransactionType::In => current
            .checked_add(quantity)
            .filter(|q| *q <= MAX_QUANTITY)
            .ok_or_else(|| {
                DomainError::validation(
                    "quantity",
                    format!("stock quantity cannot exceed {MAX_QUANTITY}"),
                )
            }),
        TransactionType::Out => {
            if quantity > current {
                Err(DomainError::insufficient_stock(current))
            } else {
                Ok(current - quantity)
            }
        }
    }
}
