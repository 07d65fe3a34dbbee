//! HS256 access/refresh token service.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use stockledger_core::PrincipalId;

use crate::claims::{Claims, TokenType};

const ACCESS_TTL_MINUTES: i64 = 30;
const REFRESH_TTL_DAYS: i64 = 1;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token creation failed: {0}")]
    Creation(String),
    #[error("token is invalid or expired")]
    Invalid,
    #[error("wrong token type for this operation")]
    WrongType,
}

/// The credential pair handed out at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a fresh access/refresh pair for a verified principal.
    pub fn issue_pair(&self, principal: PrincipalId) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access: self.issue(principal, TokenType::Access)?,
            refresh: self.issue(principal, TokenType::Refresh)?,
        })
    }

    /// Exchange a valid refresh token for a new access token.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = self.validate(refresh_token, TokenType::Refresh)?;
        self.issue(claims.sub, TokenType::Access)
    }

    /// Validate a bearer token presented on a request.
    pub fn validate_access(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate(token, TokenType::Access)
    }

    fn issue(&self, principal: PrincipalId, token_type: TokenType) -> Result<String, TokenError> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => Duration::minutes(ACCESS_TTL_MINUTES),
            TokenType::Refresh => Duration::days(REFRESH_TTL_DAYS),
        };
        let claims = Claims {
            sub: principal,
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Creation(e.to_string()))
    }

    fn validate(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)?;

        if claims.token_type != expected {
            return Err(TokenError::WrongType);
        }
        Ok(claims)
    }
}
