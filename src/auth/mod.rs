//! # CareerVerse Auth Module
//!
//! Token-backed implementation of the portal's Session Oracle.
//!
//! Tokens are minted elsewhere and shared with this server through a
//! signing secret. This module only validates them, tracks logouts, and
//! answers "signed in?" and "which role?" per request.

pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod session;

pub use errors::{AuthError, AuthResult};
pub use jwt::{JwtConfig, JwtManager, SessionClaims};
pub use session::{RequestSession, RevocationList, SessionAuthority, SessionConfig};
