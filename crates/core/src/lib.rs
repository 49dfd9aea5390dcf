//! Repricer Core - Shared types library.
//!
//! This crate provides common types used across all Repricer components:
//! - `client` - Catalog fetching and price editing against the relay
//! - `relay` - Credential-injecting forwarder to the platform API
//! - `cli` - Command-line tools for operators
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - The catalog data model and locale-aware currency handling

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
