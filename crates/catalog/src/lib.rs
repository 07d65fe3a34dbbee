//! Catalog domain module.
//!
//! Products tracked by SKU within one business. `current_quantity` is a
//! cached aggregate: outside of the opening balance set at creation and the
//! manual-correction update path, it is mutated only by the ledger. Pure
//! domain logic: no IO, no HTTP, no storage.

pub mod product;

pub use product::{Product, ProductDraft, ProductFilter, ProductPatch};
