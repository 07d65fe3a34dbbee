//! `stockledger-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

/// Upper bound for every quantity field (stock counts, movement sizes,
/// reorder levels). Quantities travel as `u64` but are capped at the 32-bit
/// positive range, so signed ledger arithmetic can never overflow.
pub const MAX_QUANTITY: u64 = 2_147_483_647;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BusinessId, PrincipalId, ProductId, TransactionId};
