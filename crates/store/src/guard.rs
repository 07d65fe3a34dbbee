//! Access guard: resolve the caller's "current business".
//!
//! The caller passes its remembered selection explicitly on every request;
//! nothing session-like is stored here. A stale selection (deleted, or owned
//! by someone else) is cleared and re-resolved exactly once, never in a loop.

use stockledger_core::{BusinessId, PrincipalId};
use stockledger_tenancy::Business;

use crate::InventoryStore;

/// Outcome of current-business resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusinessSelection {
    /// A business the caller owns, either the one they selected or the
    /// auto-selected first one.
    Selected(Business),
    /// The caller owns no businesses yet; the client should send them to the
    /// creation flow.
    NoBusiness,
}

impl InventoryStore {
    pub fn resolve_current_business(
        &self,
        owner: PrincipalId,
        selected: Option<BusinessId>,
    ) -> BusinessSelection {
        if let Some(id) = selected {
            if let Ok(business) = self.get_business(owner, id) {
                return BusinessSelection::Selected(business);
            }
            tracing::debug!(business_id = %id, "stale business selection cleared");
        }

        // Single re-resolution against the owner's first business.
        match self.list_businesses(owner).into_iter().next() {
            Some(business) => BusinessSelection::Selected(business),
            None => BusinessSelection::NoBusiness,
        }
    }
}
