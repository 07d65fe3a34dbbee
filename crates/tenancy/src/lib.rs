//! Tenancy domain module.
//!
//! A business is the tenant boundary: every product and stock transaction
//! transitively belongs to exactly one business, and a business belongs to
//! exactly one owning principal. Pure domain logic: no IO, no HTTP, no
//! storage.

pub mod business;

pub use business::{Business, BusinessPatch, NewBusiness};
