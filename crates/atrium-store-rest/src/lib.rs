//! Client for the hosted database behind the Atrium site.
//!
//! The hosted service speaks PostgREST: each table is a resource under
//! `{endpoint}/rest/v1/`, authenticated with an access key sent both as the
//! `apikey` header and as a bearer token.

mod client;

pub mod error;

pub use client::{RestConfig, RestStore};
pub use error::{Error, Result};

#[cfg(test)]
mod tests;
