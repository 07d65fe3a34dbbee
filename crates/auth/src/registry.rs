//! User registry: registration and credential verification.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::Serialize;

use stockledger_core::{DomainError, DomainResult, PrincipalId};

use crate::password;

const MIN_PASSWORD_LEN: usize = 8;

/// A registered principal. The password hash never leaves this crate and is
/// never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: PrincipalId,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    #[serde(skip_serializing)]
    password_hash: String,
}

impl User {
    pub fn id(&self) -> PrincipalId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    password: String,
}

impl Registration {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password: impl Into<String>,
    ) -> DomainResult<Self> {
        let username = username.into();
        let password = password.into();

        if username.trim().is_empty() {
            return Err(DomainError::validation("username", "username cannot be empty"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(
                "password",
                "password must be at least 8 characters",
            ));
        }

        Ok(Self {
            username,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            password,
        })
    }
}

/// In-memory user store. Usernames are unique.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: RwLock<HashMap<PrincipalId, User>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, registration: Registration) -> DomainResult<User> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());

        if users.values().any(|u| u.username == registration.username) {
            return Err(DomainError::validation(
                "username",
                "a user with that username already exists",
            ));
        }

        let password_hash = password::hash_password(&registration.password)
            .map_err(|e| DomainError::validation("password", e.to_string()))?;

        let user = User {
            id: PrincipalId::new(),
            username: registration.username,
            email: registration.email,
            first_name: registration.first_name,
            last_name: registration.last_name,
            password_hash,
        };
        tracing::info!(principal_id = %user.id, username = %user.username, "user registered");
        users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Check a username/password pair. Unknown username and wrong password
    /// are reported identically.
    pub fn verify_credentials(&self, username: &str, password: &str) -> DomainResult<PrincipalId> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());

        users
            .values()
            .find(|u| u.username == username)
            .filter(|u| password::verify_password(password, &u.password_hash))
            .map(|u| u.id)
            .ok_or(DomainError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(username: &str, password: &str) -> Registration {
        Registration::new(username, "a@b.test", "Ada", "Lovelace", password).unwrap()
    }

    #[test]
    fn short_password_is_rejected() {
        let err = Registration::new("ada", "a@b.test", "Ada", "Lovelace", "short").unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "password", .. }));
    }

    #[test]
    fn usernames_are_unique() {
        let registry = UserRegistry::new();
        registry.register(registration("ada", "password123")).unwrap();

        let err = registry.register(registration("ada", "password456")).unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "username", .. }));
    }

    #[test]
    fn credentials_verify_only_with_correct_password() {
        let registry = UserRegistry::new();
        let user = registry.register(registration("ada", "password123")).unwrap();

        assert_eq!(registry.verify_credentials("ada", "password123").unwrap(), user.id());
        assert_eq!(
            registry.verify_credentials("ada", "wrong-password").unwrap_err(),
            DomainError::Unauthenticated
        );
        assert_eq!(
            registry.verify_credentials("nobody", "password123").unwrap_err(),
            DomainError::Unauthenticated
        );
    }

    #[test]
    fn serialized_user_never_contains_password_material() {
        let registry = UserRegistry::new();
        let user = registry.register(registration("ada", "password123")).unwrap();

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
    }
}
