//! Core types and the contact-form write pipeline for Atrium.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::DataStore`]; the API layer drives
//! [`gateway::SubmissionGateway`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod gateway;
pub mod rate_limit;
pub mod sanitize;
pub mod service;
pub mod store;
pub mod submission;
pub mod telemetry;
pub mod validate;

pub use error::{Error, Result, SubmissionError};
