//! Read-side reporting over the catalog and the ledger.
//!
//! Recomputed on every call from a consistent snapshot; holds no state and
//! enforces no invariants of its own.

pub mod dashboard;

pub use dashboard::Dashboard;
