//! Shared test utilities for vaulter crates.
//!
//! This crate provides:
//! - Proptest generators for secret names, fields and values
//! - A wiremock-backed Vault speaking the AppRole login / list / read API
//! - Test fixtures with sample configuration documents and responses

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
