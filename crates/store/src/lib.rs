//! Persistence layer and transactional core.
//!
//! [`InventoryStore`] holds every business, product, and ledger entry behind
//! a single snapshot lock, plus a per-product lock table that serializes the
//! read-check-write window of `record_transaction`. All operations are
//! scoped to an owning principal; a record owned by someone else is reported
//! exactly like a record that does not exist.

pub mod guard;
pub mod inventory_store;

mod integration_tests;

pub use guard::BusinessSelection;
pub use inventory_store::InventoryStore;
