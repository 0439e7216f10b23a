//! # barterhub-auth
//!
//! Bearer-token verification. Tokens are HS256 JWTs whose `sub` claim is
//! the acting user's id. Issuance belongs to the account service; the
//! encoder here mints tokens for tests and local tooling.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
