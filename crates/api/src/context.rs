use stockledger_core::PrincipalId;

/// Authenticated identity for a request.
///
/// This is immutable and must be present for all tenant-scoped routes; the
/// auth middleware inserts it after validating the bearer token. All store
/// calls thread the principal explicitly; there is no ambient "current
/// user" state anywhere below this layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: PrincipalId,
}

impl PrincipalContext {
    pub fn new(principal_id: PrincipalId) -> Self {
        Self { principal_id }
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }
}
