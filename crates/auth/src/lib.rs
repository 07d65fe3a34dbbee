//! `stockledger-auth`: the authentication boundary.
//!
//! User registration with argon2-hashed passwords, credential verification,
//! and an HS256 access/refresh token pair. Intentionally decoupled from HTTP
//! and from the inventory store.

pub mod claims;
pub mod password;
pub mod registry;
pub mod token;

pub use claims::{Claims, TokenType};
pub use registry::{Registration, User, UserRegistry};
pub use token::{TokenError, TokenPair, TokenService};
