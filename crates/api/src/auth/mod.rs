//! Authentication primitives.
//!
//! Sign-in is delegated to the external identity provider; this service only
//! validates the HS256 bearer tokens it issues.
//!
//! - [`jwt`] -- token claims, verification config, and validation.

pub mod jwt;
