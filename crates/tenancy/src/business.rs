use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockledger_core::{BusinessId, DomainError, DomainResult, Entity, PrincipalId};

/// A tenant. Owned by exactly one principal; never auto-created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    id: BusinessId,
    name: String,
    address: String,
    owner: PrincipalId,
    created_at: DateTime<Utc>,
}

impl Business {
    pub fn id(&self) -> BusinessId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn owner(&self) -> PrincipalId {
        self.owner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Ownership check used by every scoped lookup. A business owned by a
    /// different principal is indistinguishable from one that does not exist.
    pub fn is_owned_by(&self, principal: PrincipalId) -> bool {
        self.owner == principal
    }

    /// Apply an edit. Owner and creation time never change.
    pub fn apply_patch(&mut self, patch: BusinessPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
    }
}

impl Entity for Business {
    type Id = BusinessId;

    fn id(&self) -> BusinessId {
        self.id
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name", "name cannot be empty"));
    }
    if name.len() > 100 {
        return Err(DomainError::validation("name", "name exceeds 100 characters"));
    }
    Ok(())
}

fn validate_address(address: &str) -> DomainResult<()> {
    if address.len() > 100 {
        return Err(DomainError::validation(
            "address",
            "address exceeds 100 characters",
        ));
    }
    Ok(())
}

/// Validated input for creating a business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBusiness {
    name: String,
    address: String,
}

impl NewBusiness {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let address = address.into();

        validate_name(&name)?;
        validate_address(&address)?;

        Ok(Self { name, address })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Materialize the record under the given owner.
    pub fn into_business(self, owner: PrincipalId, created_at: DateTime<Utc>) -> Business {
        Business {
            id: BusinessId::new(),
            name: self.name,
            address: self.address,
            owner,
            created_at,
        }
    }
}

/// Validated input for editing a business. `None` leaves a field unchanged,
/// so a full PUT body and a partial PATCH body go through the same path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessPatch {
    name: Option<String>,
    address: Option<String>,
}

impl BusinessPatch {
    pub fn new(name: Option<String>, address: Option<String>) -> DomainResult<Self> {
        if let Some(name) = name.as_deref() {
            validate_name(name)?;
        }
        if let Some(address) = address.as_deref() {
            validate_address(address)?;
        }

        Ok(Self { name, address })
    }

    /// The new name, if this edit renames the business. The store re-checks
    /// name uniqueness against it.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
