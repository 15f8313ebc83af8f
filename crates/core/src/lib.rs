//! Domain logic for the Chapel congregation backend.
//!
//! Everything in this crate is pure: no I/O, no database, no HTTP. The
//! repository layer (`chapel-db`) and the API server (`chapel-api`) both
//! build on these types and rules.

pub mod content;
pub mod error;
pub mod live_stream;
pub mod pagination;
pub mod registration;
pub mod roles;
pub mod sermon_query;
pub mod types;
