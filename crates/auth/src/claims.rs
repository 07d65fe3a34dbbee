//! JWT claims model (transport-agnostic).

use serde::{Deserialize, Serialize};

use stockledger_core::PrincipalId;

/// Which half of the credential pair a token is. A refresh token is never
/// accepted where an access token is expected, and vice versa.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by every issued token. `iat`/`exp` are Unix timestamps, as
/// `jsonwebtoken` expects for its built-in expiry validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated principal.
    pub sub: PrincipalId,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}
