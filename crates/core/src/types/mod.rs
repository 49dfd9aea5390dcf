//! Core types for Repricer.
//!
//! This module provides the catalog data model and currency handling shared
//! by the client, relay, and CLI crates.

pub mod catalog;
pub mod money;

pub use catalog::{Product, Variant};
pub use money::{CurrencyFormat, PriceError, canonical_string};
