//! Ledger domain module.
//!
//! The ledger is the append-only sequence of stock transactions whose net
//! effect determines a product's quantity. Entries are immutable once
//! created; correcting a mistake means recording a compensating entry of the
//! opposite type, never editing history. Pure domain logic; the store owns
//! persistence and the per-product commit discipline.

pub mod transaction;

pub use transaction::{apply_movement, NewTransaction, StockTransaction, TransactionType};
